use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::loans::domain::model::BorrowRecordEntity;
use crate::utils::date::{opt_serializer, serializer};

// BorrowRecordDto abstracts a loan as returned by the circulation and membership services.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowRecordDto {
    pub record_id: i64,
    pub member_id: i64,
    pub book_id: i64,
    pub status: LoanStatus,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(default, with = "opt_serializer")]
    pub return_date: Option<NaiveDateTime>,
}

impl Identifiable for BorrowRecordDto {
    fn id(&self) -> i64 {
        self.record_id
    }
}

impl From<&BorrowRecordEntity> for BorrowRecordDto {
    fn from(other: &BorrowRecordEntity) -> Self {
        Self {
            record_id: other.record_id,
            member_id: other.member_id,
            book_id: other.book_id,
            status: other.status(),
            borrow_date: other.borrow_date,
            return_date: other.return_date,
        }
    }
}
