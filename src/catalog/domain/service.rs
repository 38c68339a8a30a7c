use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{EntityKind, LibraryError, LibraryResult, SearchField};
use crate::core::repository::{fields, FieldValue, Predicate, UpdateOutcome};
use crate::gateway::events::{publish_or_warn, EventPublisher};
use crate::guard::domain::DeletionGuard;
use crate::utils::date::now;

pub(crate) struct CatalogServiceImpl {
    config: Configuration,
    book_repository: Arc<BookRepository>,
    deletion_guard: Box<dyn DeletionGuard>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<BookRepository>,
                      deletion_guard: Box<dyn DeletionGuard>,
                      events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            book_repository,
            deletion_guard,
            events_publisher,
        }
    }
}

fn validate_stock(stock: i64) -> LibraryResult<()> {
    if stock < 0 {
        return Err(LibraryError::validation(
            format!("stock must not be negative, got {}", stock).as_str(), Some("400".to_string())));
    }
    Ok(())
}

fn sorted(mut books: Vec<BookEntity>) -> Vec<BookDto> {
    books.sort_by_key(|b| b.book_id);
    books.iter().map(BookDto::from).collect()
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, title: &str, author: &str, category: &str, stock: Option<i64>) -> LibraryResult<BookDto> {
        if title.trim().is_empty() {
            return Err(LibraryError::validation("book title must not be empty", Some("400".to_string())));
        }
        let stock = stock.unwrap_or(self.config.default_stock);
        validate_stock(stock)?;
        let book = self.book_repository.create(
            &BookEntity::new(title.trim(), author.trim(), category.trim(), stock)).await?;
        info!(book_id = book.book_id, stock = book.stock, "book added");
        let dto = BookDto::from(&book);
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::added(
            "books", "books", book.book_id.to_string().as_str(), &self.config.event_metadata(), &dto)).await;
        Ok(dto)
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        Ok(sorted(self.book_repository.query_all(&[]).await?))
    }

    async fn search_books(&self, term: &str, field: SearchField) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.query_all(&[Predicate::ilike(field.column(), term)]).await?;
        Ok(sorted(books))
    }

    async fn find_book(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn update_stock(&self, id: i64, stock: i64) -> LibraryResult<BookDto> {
        validate_stock(stock)?;
        let _ = self.book_repository.get(id).await?;
        let changes = fields([("stock", FieldValue::Int(stock)), ("updated_at", FieldValue::Timestamp(now()))]);
        if self.book_repository.update(id, &changes, None).await? == UpdateOutcome::NoChange {
            return Err(LibraryError::not_found(format!("book not found for {}", id).as_str()));
        }
        let book = BookDto::from(&self.book_repository.get(id).await?);
        info!(book_id = id, stock, "book stock updated");
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::updated(
            "books", "books", id.to_string().as_str(), &self.config.event_metadata(), &book)).await;
        Ok(book)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let _ = self.book_repository.get(id).await?;
        self.deletion_guard.check(EntityKind::Book, id).await?;
        let _ = self.book_repository.delete(id).await?;
        info!(book_id = id, "book removed");
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::deleted(
            "books", "books", id.to_string().as_str(), &self.config.event_metadata(), &id)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, SearchField};
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::loans::domain::model::BorrowRecordEntity;
    use crate::store::factory::Repositories;

    lazy_static! {
        static ref REPOS: AsyncOnce<Repositories> = AsyncOnce::new(async {
                Repositories::memory().await
            });
        static ref SUT_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                let publisher = create_publisher(GatewayPublisherVia::Logs).await;
                factory::create_catalog_service(&Configuration::new("test"), REPOS.get().await, publisher)
            });
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book("Dune", "Frank Herbert", "SciFi", Some(3)).await.expect("should add book");
        assert!(book.book_id > 0);
        assert_eq!(3, book.stock);

        let loaded = catalog_svc.find_book(book.book_id).await.expect("should return book");
        assert_eq!(book, loaded);

        let defaulted = catalog_svc.add_book("Emma", "Jane Austen", "Classic", None).await.expect("should add book");
        assert_eq!(1, defaulted.stock);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_books() {
        let catalog_svc = SUT_SVC.get().await;
        assert!(matches!(catalog_svc.add_book("", "a", "c", Some(1)).await, Err(LibraryError::Validation { .. })));
        assert!(matches!(catalog_svc.add_book("t", "a", "c", Some(-1)).await, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_update_stock() {
        let catalog_svc = SUT_SVC.get().await;
        let book = catalog_svc.add_book("Ubik", "Philip K. Dick", "SciFi", Some(1)).await.expect("should add book");

        let updated = catalog_svc.update_stock(book.book_id, 7).await.expect("should update stock");
        assert_eq!(7, updated.stock);
        let updated = catalog_svc.update_stock(book.book_id, 0).await.expect("zero stock is valid");
        assert_eq!(0, updated.stock);

        assert!(matches!(catalog_svc.update_stock(book.book_id, -1).await, Err(LibraryError::Validation { .. })));
        assert_eq!(0, catalog_svc.find_book(book.book_id).await.expect("should return book").stock);
        assert!(matches!(catalog_svc.update_stock(999_999, 1).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_search_books() {
        let catalog_svc = SUT_SVC.get().await;
        let book = catalog_svc.add_book("The Dispossessed", "Ursula K. Le Guin", "Utopia", Some(1)).await.expect("should add book");

        let res = catalog_svc.search_books("dispossess", SearchField::Title).await.expect("should search");
        assert!(res.iter().any(|b| b.book_id == book.book_id));
        let res = catalog_svc.search_books("LE GUIN", SearchField::Author).await.expect("should search");
        assert!(res.iter().any(|b| b.book_id == book.book_id));
        let res = catalog_svc.search_books("utopia", SearchField::Title).await.expect("should search");
        assert!(!res.iter().any(|b| b.book_id == book.book_id));

        let all = catalog_svc.list_books().await.expect("should list");
        assert!(all.windows(2).all(|w| w[0].book_id < w[1].book_id));
        assert!(all.iter().any(|b| b.book_id == book.book_id));
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let catalog_svc = SUT_SVC.get().await;
        let book = catalog_svc.add_book("Solaris", "Stanislaw Lem", "SciFi", Some(1)).await.expect("should add book");

        catalog_svc.remove_book(book.book_id).await.expect("should remove book");
        assert!(matches!(catalog_svc.find_book(book.book_id).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(catalog_svc.remove_book(book.book_id).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_not_remove_borrowed_book() {
        let catalog_svc = SUT_SVC.get().await;
        let repos = REPOS.get().await;
        let book = catalog_svc.add_book("Kindred", "Octavia Butler", "SciFi", Some(1)).await.expect("should add book");
        let record = repos.borrow_records.create(&BorrowRecordEntity::new(1, book.book_id)).await.expect("should create record");

        assert!(matches!(catalog_svc.remove_book(book.book_id).await, Err(LibraryError::Conflict { .. })));

        repos.borrow_records.delete(record.record_id).await.expect("should delete record");
        catalog_svc.remove_book(book.book_id).await.expect("should remove book");
    }
}
