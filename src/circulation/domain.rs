pub mod service;

use async_trait::async_trait;
use crate::circulation::dto::ReturnReceipt;
use crate::core::library::LibraryResult;
use crate::loans::dto::BorrowRecordDto;

// CirculationService moves copies between the shelf and members. Stock is only
// ever changed with a conditional update on the value last read.
#[async_trait]
pub trait CirculationService: Sync + Send {
    // takes one copy off the shelf and opens a loan for it
    async fn borrow(&self, member_id: i64, book_id: i64) -> LibraryResult<BorrowRecordDto>;

    // closes the open loan and puts the copy back; a receipt with
    // StockNotRestored means the loan closed but stock is one short
    async fn return_book(&self, member_id: i64, book_id: i64) -> LibraryResult<ReturnReceipt>;
}
