use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicI64, Ordering};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{matches_all, Fields, Predicate, Repository, Row, UpdateOutcome};

// MemoryRepository keeps one table in process. Every operation takes the table
// lock once, so a conditional update is checked and applied atomically.
#[derive(Debug)]
pub struct MemoryRepository<E: Row> {
    rows: RwLock<BTreeMap<i64, E>>,
    sequence: AtomicI64,
}

impl<E: Row> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }
}

impl<E: Row> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Row> Repository<E> for MemoryRepository<E> {
    async fn create(&self, entity: &E) -> LibraryResult<E> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let mut row = entity.clone();
        row.assign_id(id);
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(LibraryError::internal(format!("duplicate {} id {}", E::TABLE, id).as_str(), None));
        }
        rows.insert(id, row.clone());
        debug!(table = E::TABLE, id, "inserted row");
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &Fields, expected: Option<&Fields>) -> LibraryResult<UpdateOutcome> {
        let mut rows = self.rows.write().await;
        let current = match rows.get(&id) {
            Some(row) => row,
            None => return Ok(UpdateOutcome::NoChange),
        };
        if let Some(expected) = expected {
            if !current.satisfies(expected)? {
                return Ok(UpdateOutcome::NoChange);
            }
        }
        let updated = current.apply(changes)?;
        rows.insert(id, updated);
        Ok(UpdateOutcome::Updated)
    }

    async fn get(&self, id: i64) -> LibraryResult<E> {
        let rows = self.rows.read().await;
        rows.get(&id).cloned().ok_or_else(||
            LibraryError::not_found(format!("{} not found for {}", E::TABLE, id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        match rows.remove(&id) {
            Some(_) => Ok(1),
            None => Err(LibraryError::not_found(format!("{} not found for {}", E::TABLE, id).as_str())),
        }
    }

    async fn query(&self, predicates: &[Predicate],
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        let start = match page {
            Some(token) => Bound::Excluded(token.parse::<i64>().map_err(|_|
                LibraryError::validation(format!("invalid page token {}", token).as_str(), Some("400".to_string())))?),
            None => Bound::Unbounded,
        };
        let page_size = page_size.max(1);
        let rows = self.rows.read().await;
        let mut records = vec![];
        let mut next_page = None;
        for (id, row) in rows.range((start, Bound::Unbounded)) {
            if !matches_all(predicates, row)? {
                continue;
            }
            if records.len() == page_size {
                next_page = records.last().map(|last: &E| last.id().to_string());
                break;
            }
            debug_assert_eq!(*id, row.id());
            records.push(row.clone());
        }
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::core::library::LibraryError;
    use crate::core::repository::{fields, FieldValue, Predicate, Repository, UpdateOutcome};
    use crate::loans::domain::model::BorrowRecordEntity;
    use crate::store::memory::MemoryRepository;

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = MemoryRepository::<BookEntity>::new();
        let book = books_repo.create(&BookEntity::new("Dune", "Frank Herbert", "SciFi", 2)).await.expect("should create book");
        assert_eq!(1, book.book_id);
        let second = books_repo.create(&BookEntity::new("Emma", "Jane Austen", "Classic", 1)).await.expect("should create book");
        assert_eq!(2, second.book_id);

        let loaded = books_repo.get(book.book_id).await.expect("should return book");
        assert_eq!(book, loaded);
        assert!(matches!(books_repo.get(99).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_update_only_when_expected_matches() {
        let books_repo = MemoryRepository::<BookEntity>::new();
        let book = books_repo.create(&BookEntity::new("Dune", "Frank Herbert", "SciFi", 2)).await.expect("should create book");

        let res = books_repo.update(book.book_id, &fields([("stock", FieldValue::Int(1))]),
                                    Some(&fields([("stock", FieldValue::Int(5))]))).await.expect("should run update");
        assert_eq!(UpdateOutcome::NoChange, res);
        let res = books_repo.update(book.book_id, &fields([("stock", FieldValue::Int(1))]),
                                    Some(&fields([("stock", FieldValue::Int(2))]))).await.expect("should run update");
        assert_eq!(UpdateOutcome::Updated, res);
        assert_eq!(1, books_repo.get(book.book_id).await.expect("should return book").stock);

        let res = books_repo.update(book.book_id, &fields([("title", FieldValue::Text("Dune Messiah".to_string()))]), None)
            .await.expect("should run update");
        assert_eq!(UpdateOutcome::Updated, res);
        let res = books_repo.update(77, &fields([("stock", FieldValue::Int(1))]), None).await.expect("should run update");
        assert_eq!(UpdateOutcome::NoChange, res);
    }

    #[tokio::test]
    async fn test_should_close_record_only_when_open() {
        let records_repo = MemoryRepository::<BorrowRecordEntity>::new();
        let record = records_repo.create(&BorrowRecordEntity::new(1, 1)).await.expect("should create record");
        let close = fields([("return_date", FieldValue::Timestamp(record.borrow_date))]);
        let open = fields([("return_date", FieldValue::Null)]);
        assert_eq!(UpdateOutcome::Updated, records_repo.update(record.record_id, &close, Some(&open)).await.expect("close"));
        assert_eq!(UpdateOutcome::NoChange, records_repo.update(record.record_id, &close, Some(&open)).await.expect("close again"));
    }

    #[tokio::test]
    async fn test_should_query_books() {
        let books_repo = MemoryRepository::<BookEntity>::new();
        for i in 0..25 {
            let category = if i % 5 == 0 { "Poetry" } else { "Prose" };
            let _ = books_repo.create(&BookEntity::new(format!("title_{}", i).as_str(), "author", category, 1))
                .await.expect("should create book");
        }
        let res = books_repo.query(&[Predicate::ilike("category", "poetry")], None, 100).await.expect("should query");
        assert_eq!(5, res.records.len());
        assert_eq!(None, res.next_page);

        let mut next_page = None;
        let mut total = 0;
        for _ in 0..10 {
            let res = books_repo.query(&[], next_page.as_deref(), 10).await.expect("should query");
            total += res.records.len();
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        assert_eq!(25, total);
        assert_eq!(25, books_repo.query_all(&[]).await.expect("should query all").len());
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = MemoryRepository::<BookEntity>::new();
        let book = books_repo.create(&BookEntity::new("Dune", "Frank Herbert", "SciFi", 2)).await.expect("should create book");
        assert_eq!(1, books_repo.delete(book.book_id).await.expect("should delete book"));
        assert!(books_repo.get(book.book_id).await.is_err());
        assert!(matches!(books_repo.delete(book.book_id).await, Err(LibraryError::NotFound { .. })));
    }
}
