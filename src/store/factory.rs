use std::sync::Arc;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use tracing::info;
use crate::books::factory::create_book_repository;
use crate::books::repository::BookRepository;
use crate::core::repository::{Repository, RepositoryStore, Row};
use crate::loans::factory::create_borrow_record_repository;
use crate::loans::repository::BorrowRecordRepository;
use crate::members::factory::create_member_repository;
use crate::members::repository::MemberRepository;
use crate::store::ddb::DDBRepository;
use crate::store::memory::MemoryRepository;
use crate::utils::ddb::{build_db_client, create_table, SEQUENCES_TABLE, SEQUENCE_KEY};

pub(crate) async fn create_repository<E: Row>(store: RepositoryStore) -> Arc<dyn Repository<E>> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBRepository::<E>::new(client, E::TABLE, SEQUENCES_TABLE))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            // tables may already exist
            let _ = create_table(&client, SEQUENCES_TABLE, SEQUENCE_KEY, ScalarAttributeType::S).await;
            let _ = create_table(&client, E::TABLE, E::ID_FIELD, ScalarAttributeType::N).await;
            Arc::new(DDBRepository::<E>::new(client, E::TABLE, SEQUENCES_TABLE))
        }
        RepositoryStore::Memory => {
            Arc::new(MemoryRepository::<E>::new())
        }
    }
}

// Repositories is the storage handle shared by every service of one process.
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<BookRepository>,
    pub members: Arc<MemberRepository>,
    pub borrow_records: Arc<BorrowRecordRepository>,
}

impl Repositories {
    pub async fn build(store: RepositoryStore) -> Self {
        info!(store = ?store, "opening repositories");
        Repositories {
            books: create_book_repository(store).await,
            members: create_member_repository(store).await,
            borrow_records: create_borrow_record_repository(store).await,
        }
    }

    pub async fn memory() -> Self {
        Self::build(RepositoryStore::Memory).await
    }
}
