pub mod service;

use async_trait::async_trait;
use crate::core::library::{EntityKind, LibraryResult};

// DeletionGuard refuses removal of books and members still referenced by open loans.
#[async_trait]
pub trait DeletionGuard: Sync + Send {
    // number of open borrow records referencing the entity
    async fn open_loans(&self, kind: EntityKind, id: i64) -> LibraryResult<usize>;

    async fn can_delete(&self, kind: EntityKind, id: i64) -> LibraryResult<bool> {
        Ok(self.open_loans(kind, id).await? == 0)
    }

    // fails with Conflict naming the open loan count
    async fn check(&self, kind: EntityKind, id: i64) -> LibraryResult<()>;
}
