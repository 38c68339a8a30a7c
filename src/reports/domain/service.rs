use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Predicate;
use crate::loans::repository::BorrowRecordRepository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::reports::domain::ReportingService;
use crate::reports::dto::{MemberBorrowsRow, OverdueRow, TopBorrowedRow};
use crate::utils::date::{days_before, now};

pub(crate) struct ReportingServiceImpl {
    config: Configuration,
    book_repository: Arc<BookRepository>,
    member_repository: Arc<MemberRepository>,
    borrow_record_repository: Arc<BorrowRecordRepository>,
}

impl ReportingServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<BookRepository>,
                      member_repository: Arc<MemberRepository>,
                      borrow_record_repository: Arc<BorrowRecordRepository>) -> Self {
        Self {
            config: config.clone(),
            book_repository,
            member_repository,
            borrow_record_repository,
        }
    }

    async fn books_by_id(&self) -> LibraryResult<HashMap<i64, BookEntity>> {
        Ok(self.book_repository.query_all(&[]).await?
            .into_iter().map(|b| (b.book_id, b)).collect())
    }

    async fn members_by_id(&self) -> LibraryResult<HashMap<i64, MemberEntity>> {
        Ok(self.member_repository.query_all(&[]).await?
            .into_iter().map(|m| (m.member_id, m)).collect())
    }
}

// counts per key, highest count first and ties by ascending key
pub(crate) fn rank<I: IntoIterator<Item=i64>>(keys: I) -> Vec<(i64, usize)> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut ranked: Vec<(i64, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

#[async_trait]
impl ReportingService for ReportingServiceImpl {
    async fn top_borrowed(&self, limit: Option<usize>) -> LibraryResult<Vec<TopBorrowedRow>> {
        let limit = limit.unwrap_or(self.config.top_borrowed_limit);
        let records = self.borrow_record_repository.query_all(&[]).await?;
        let books = self.books_by_id().await?;
        let rows: Vec<TopBorrowedRow> = rank(records.iter().map(|r| r.book_id)).into_iter()
            .filter_map(|(book_id, borrow_count)| books.get(&book_id).map(|book| TopBorrowedRow {
                book_id,
                title: book.title.to_string(),
                author: book.author.to_string(),
                category: book.category.to_string(),
                borrow_count,
            }))
            .take(limit)
            .collect();
        debug!(limit, rows = rows.len(), "top borrowed report");
        Ok(rows)
    }

    async fn overdue_members(&self, threshold_days: Option<i64>) -> LibraryResult<Vec<OverdueRow>> {
        let threshold_days = threshold_days.unwrap_or(self.config.overdue_days);
        if threshold_days < 0 {
            return Err(LibraryError::validation(
                format!("overdue threshold must not be negative, got {}", threshold_days).as_str(), Some("400".to_string())));
        }
        let at = now();
        // a cutoff before the earliest representable date leaves nothing overdue
        let cutoff = match days_before(at, threshold_days) {
            Some(cutoff) => cutoff,
            None => return Ok(vec![]),
        };
        let mut open = self.borrow_record_repository.query_all(&[Predicate::is_null("return_date")]).await?;
        open.retain(|r| r.borrow_date < cutoff);
        if open.is_empty() {
            return Ok(vec![]);
        }
        open.sort_by_key(|r| (r.borrow_date, r.record_id));
        let members = self.members_by_id().await?;
        let books = self.books_by_id().await?;
        let rows: Vec<OverdueRow> = open.iter()
            .filter_map(|r| match (members.get(&r.member_id), books.get(&r.book_id)) {
                (Some(member), Some(book)) => Some(OverdueRow {
                    record_id: r.record_id,
                    member_id: member.member_id,
                    member_name: member.name.to_string(),
                    member_email: member.email.to_string(),
                    book_id: book.book_id,
                    title: book.title.to_string(),
                    borrow_date: r.borrow_date,
                    days_out: (at - r.borrow_date).num_days(),
                }),
                _ => None,
            })
            .collect();
        debug!(threshold_days, rows = rows.len(), "overdue report");
        Ok(rows)
    }

    async fn borrows_per_member(&self) -> LibraryResult<Vec<MemberBorrowsRow>> {
        let records = self.borrow_record_repository.query_all(&[]).await?;
        if records.is_empty() {
            return Ok(vec![]);
        }
        let members = self.members_by_id().await?;
        Ok(rank(records.iter().map(|r| r.member_id)).into_iter()
            .filter_map(|(member_id, borrow_count)| members.get(&member_id).map(|member| MemberBorrowsRow {
                member_id,
                name: member.name.to_string(),
                email: member.email.to_string(),
                borrow_count,
            }))
            .collect())
    }
}
