use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{FieldValue, Fields, Predicate, Repository, Row, UpdateOutcome};
use crate::store::memory::MemoryRepository;

// wraps a memory table and fails inserts or stock increments on demand
pub(crate) struct FlakyRepository<E: Row> {
    inner: MemoryRepository<E>,
    fail_create: bool,
    fail_increment: bool,
}

impl<E: Row> FlakyRepository<E> {
    pub(crate) fn new(fail_create: bool, fail_increment: bool) -> Self {
        Self { inner: MemoryRepository::new(), fail_create, fail_increment }
    }
}

fn is_increment(changes: &Fields, expected: Option<&Fields>) -> bool {
    match (changes.get("stock"), expected.and_then(|e| e.get("stock"))) {
        (Some(FieldValue::Int(to)), Some(FieldValue::Int(from))) => to > from,
        _ => false,
    }
}

#[async_trait]
impl<E: Row> Repository<E> for FlakyRepository<E> {
    async fn create(&self, entity: &E) -> LibraryResult<E> {
        if self.fail_create {
            return Err(LibraryError::database("insert rejected", None, false));
        }
        self.inner.create(entity).await
    }

    async fn update(&self, id: i64, changes: &Fields, expected: Option<&Fields>) -> LibraryResult<UpdateOutcome> {
        if self.fail_increment && is_increment(changes, expected) {
            return Err(LibraryError::database("update rejected", None, false));
        }
        self.inner.update(id, changes, expected).await
    }

    async fn get(&self, id: i64) -> LibraryResult<E> {
        self.inner.get(id).await
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        self.inner.delete(id).await
    }

    async fn query(&self, predicates: &[Predicate], page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        self.inner.query(predicates, page, page_size).await
    }
}
