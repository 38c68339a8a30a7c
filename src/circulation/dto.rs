use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::loans::dto::BorrowRecordDto;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ReturnStatus {
    Completed,
    // the loan is closed but the copy was not added back to stock
    StockNotRestored,
}

impl Display for ReturnStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReturnStatus::Completed => write!(f, "Completed"),
            ReturnStatus::StockNotRestored => write!(f, "StockNotRestored"),
        }
    }
}

// ReturnReceipt is the closed loan plus whether stock was restored.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub record: BorrowRecordDto,
    pub status: ReturnStatus,
}

impl ReturnReceipt {
    pub fn new(record: BorrowRecordDto, status: ReturnStatus) -> Self {
        Self {
            record,
            status,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ReturnStatus::Completed
    }
}
