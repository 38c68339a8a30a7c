use std::sync::Arc;
use crate::core::repository::RepositoryStore;
use crate::loans::domain::model::BorrowRecordEntity;
use crate::loans::repository::BorrowRecordRepository;
use crate::store::factory::create_repository;

pub async fn create_borrow_record_repository(store: RepositoryStore) -> Arc<BorrowRecordRepository> {
    create_repository::<BorrowRecordEntity>(store).await
}
