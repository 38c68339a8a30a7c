use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryResult, LoanStatus};
use crate::core::repository::{FieldValue, Row};
use crate::utils::date::{now, opt_serializer, serializer};

// BorrowRecordEntity is one loan of one copy; it stays Open until return_date is set.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowRecordEntity {
    pub record_id: i64,
    pub member_id: i64,
    pub book_id: i64,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(default, with = "opt_serializer")]
    pub return_date: Option<NaiveDateTime>,
}

impl BorrowRecordEntity {
    pub fn new(member_id: i64, book_id: i64) -> Self {
        Self {
            record_id: 0,
            member_id,
            book_id,
            borrow_date: now(),
            return_date: None,
        }
    }

    pub fn status(&self) -> LoanStatus {
        if self.return_date.is_some() {
            LoanStatus::Closed
        } else {
            LoanStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == LoanStatus::Open
    }
}

impl Identifiable for BorrowRecordEntity {
    fn id(&self) -> i64 {
        self.record_id
    }
}

impl Row for BorrowRecordEntity {
    const TABLE: &'static str = "borrow_records";
    const ID_FIELD: &'static str = "record_id";

    fn assign_id(&mut self, id: i64) {
        self.record_id = id;
    }

    fn field(&self, name: &str) -> LibraryResult<FieldValue> {
        match name {
            "record_id" => Ok(FieldValue::Int(self.record_id)),
            "member_id" => Ok(FieldValue::Int(self.member_id)),
            "book_id" => Ok(FieldValue::Int(self.book_id)),
            "borrow_date" => Ok(FieldValue::Timestamp(self.borrow_date)),
            "return_date" => Ok(FieldValue::from(self.return_date)),
            _ => Err(Self::unknown_field(name)),
        }
    }

    // a closed record is immutable, so only an open record's return_date may be set
    fn set_field(&mut self, name: &str, value: FieldValue) -> LibraryResult<()> {
        match (name, value) {
            ("return_date", FieldValue::Timestamp(t)) if self.return_date.is_none() => {
                self.return_date = Some(t);
            }
            ("return_date", other) => {
                return Err(Self::type_mismatch(name, &other));
            }
            ("record_id" | "member_id" | "book_id" | "borrow_date", other) => {
                return Err(Self::type_mismatch(name, &other));
            }
            _ => return Err(Self::unknown_field(name)),
        }
        Ok(())
    }
}
