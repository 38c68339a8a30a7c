use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TopBorrowedRow {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub borrow_count: usize,
}

// OverdueRow is one open loan past the threshold, with its member and book.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OverdueRow {
    pub record_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub member_email: String,
    pub book_id: i64,
    pub title: String,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    pub days_out: i64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberBorrowsRow {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    pub borrow_count: usize,
}
