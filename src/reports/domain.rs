pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::reports::dto::{MemberBorrowsRow, OverdueRow, TopBorrowedRow};

// ReportingService aggregates borrow history; it never writes and returns
// empty rows rather than errors when there is nothing to report.
#[async_trait]
pub trait ReportingService: Sync + Send {
    // most borrowed books over all loans, ties by ascending book id;
    // limit defaults to top_borrowed_limit
    async fn top_borrowed(&self, limit: Option<usize>) -> LibraryResult<Vec<TopBorrowedRow>>;

    // open loans borrowed more than threshold_days ago, oldest first;
    // threshold defaults to overdue_days
    async fn overdue_members(&self, threshold_days: Option<i64>) -> LibraryResult<Vec<OverdueRow>>;

    // loans per member over all loans, ties by ascending member id
    async fn borrows_per_member(&self) -> LibraryResult<Vec<MemberBorrowsRow>>;
}
