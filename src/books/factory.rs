use std::sync::Arc;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::repository::RepositoryStore;
use crate::store::factory::create_repository;

pub async fn create_book_repository(store: RepositoryStore) -> Arc<BookRepository> {
    create_repository::<BookEntity>(store).await
}
