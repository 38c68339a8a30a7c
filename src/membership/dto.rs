use serde::{Deserialize, Serialize};
use crate::loans::dto::BorrowRecordDto;
use crate::members::dto::MemberDto;

// MemberHistoryDto is a member together with every loan it ever made,
// oldest first.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberHistoryDto {
    pub member: MemberDto,
    pub borrows: Vec<BorrowRecordDto>,
}

impl MemberHistoryDto {
    pub fn open_loans(&self) -> usize {
        self.borrows.iter().filter(|b| b.return_date.is_none()).count()
    }
}
