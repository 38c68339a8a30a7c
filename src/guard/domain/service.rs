use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::core::library::{EntityKind, LibraryError, LibraryResult};
use crate::core::repository::Predicate;
use crate::guard::domain::DeletionGuard;
use crate::loans::repository::BorrowRecordRepository;

pub(crate) struct DeletionGuardImpl {
    borrow_record_repository: Arc<BorrowRecordRepository>,
}

impl DeletionGuardImpl {
    pub(crate) fn new(borrow_record_repository: Arc<BorrowRecordRepository>) -> Self {
        Self {
            borrow_record_repository,
        }
    }
}

#[async_trait]
impl DeletionGuard for DeletionGuardImpl {
    async fn open_loans(&self, kind: EntityKind, id: i64) -> LibraryResult<usize> {
        let open = self.borrow_record_repository.query_all(&[
            Predicate::equals(kind.loan_field(), id),
            Predicate::is_null("return_date"),
        ]).await?;
        Ok(open.len())
    }

    async fn check(&self, kind: EntityKind, id: i64) -> LibraryResult<()> {
        let count = self.open_loans(kind, id).await?;
        if count > 0 {
            info!(kind = %kind, id, open_loans = count, "deletion refused");
            return Err(LibraryError::conflict(
                format!("cannot delete {} {}: {} open borrow record(s)", kind, id, count).as_str(),
                Some("open_loans".to_string())));
        }
        Ok(())
    }
}
