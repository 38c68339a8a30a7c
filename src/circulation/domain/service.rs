use std::cmp;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, error, info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::{ReturnReceipt, ReturnStatus};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{fields, FieldValue, Predicate, UpdateOutcome};
use crate::gateway::events::{publish_or_warn, EventPublisher};
use crate::loans::domain::model::BorrowRecordEntity;
use crate::loans::dto::BorrowRecordDto;
use crate::loans::repository::BorrowRecordRepository;
use crate::members::repository::MemberRepository;
use crate::utils::date::now;

pub(crate) struct CirculationServiceImpl {
    config: Configuration,
    book_repository: Arc<BookRepository>,
    member_repository: Arc<MemberRepository>,
    borrow_record_repository: Arc<BorrowRecordRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CirculationServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<BookRepository>,
                      member_repository: Arc<MemberRepository>,
                      borrow_record_repository: Arc<BorrowRecordRepository>,
                      events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            book_repository,
            member_repository,
            borrow_record_repository,
            events_publisher,
        }
    }

    fn max_attempts(&self) -> u32 {
        cmp::max(self.config.max_stock_attempts, 1)
    }

    async fn backoff(&self, attempt: u32) {
        let base = self.config.retry_backoff_ms;
        if base == 0 {
            return;
        }
        let jitter = rand::thread_rng().gen_range(0..=base);
        tokio::time::sleep(backoff_delay(base, attempt, jitter)).await;
    }

    // Read-decide-write on stock: the write only lands if stock still holds the
    // value that was read, otherwise the cycle is repeated.
    async fn adjust_stock(&self, book_id: i64, delta: i64) -> LibraryResult<BookEntity> {
        let max_attempts = self.max_attempts();
        for attempt in 1..=max_attempts {
            let mut book = self.book_repository.get(book_id).await?;
            let stock = book.stock + delta;
            if stock < 0 {
                return Err(LibraryError::unavailable(
                    format!("no copies of book {} available", book_id).as_str(), Some("out_of_stock".to_string())));
            }
            let changes = fields([("stock", FieldValue::Int(stock)), ("updated_at", FieldValue::Timestamp(now()))]);
            let expected = fields([("stock", FieldValue::Int(book.stock))]);
            match self.book_repository.update(book_id, &changes, Some(&expected)).await? {
                UpdateOutcome::Updated => {
                    debug!(book_id, from = book.stock, to = stock, attempt, "stock adjusted");
                    book.stock = stock;
                    return Ok(book);
                }
                UpdateOutcome::NoChange => {
                    warn!(book_id, attempt, max_attempts, "stock changed concurrently, retrying");
                    if attempt < max_attempts {
                        self.backoff(attempt).await;
                    }
                }
            }
        }
        Err(LibraryError::conflict(
            format!("stock of book {} kept changing, gave up after {} attempts", book_id, max_attempts).as_str(),
            Some("retries_exhausted".to_string())))
    }

    async fn open_records(&self, member_id: i64, book_id: i64) -> LibraryResult<Vec<BorrowRecordEntity>> {
        let mut records = self.borrow_record_repository.query_all(&[
            Predicate::equals("member_id", member_id),
            Predicate::equals("book_id", book_id),
            Predicate::is_null("return_date"),
        ]).await?;
        records.sort_by_key(|r| (r.borrow_date, r.record_id));
        Ok(records)
    }

    // the earliest open loan of the pair; more than one is a data-integrity problem
    async fn locate_open(&self, member_id: i64, book_id: i64) -> LibraryResult<BorrowRecordEntity> {
        let mut records = self.open_records(member_id, book_id).await?;
        if records.len() > 1 {
            let ids: Vec<i64> = records.iter().map(|r| r.record_id).collect();
            warn!(member_id, book_id, open_records = ?ids, "multiple open borrow records, returning the earliest");
        }
        if records.is_empty() {
            return Err(LibraryError::not_found(
                format!("no active borrow for member {} and book {}", member_id, book_id).as_str()));
        }
        Ok(records.swap_remove(0))
    }

    async fn close_record(&self, member_id: i64, book_id: i64) -> LibraryResult<BorrowRecordEntity> {
        let max_attempts = self.max_attempts();
        for attempt in 1..=max_attempts {
            let mut record = self.locate_open(member_id, book_id).await?;
            let returned_at = cmp::max(now(), record.borrow_date);
            let changes = fields([("return_date", FieldValue::Timestamp(returned_at))]);
            let expected = fields([("return_date", FieldValue::Null)]);
            match self.borrow_record_repository.update(record.record_id, &changes, Some(&expected)).await? {
                UpdateOutcome::Updated => {
                    record.return_date = Some(returned_at);
                    return Ok(record);
                }
                UpdateOutcome::NoChange => {
                    warn!(record_id = record.record_id, attempt, "borrow record closed concurrently, locating again");
                }
            }
        }
        Err(LibraryError::conflict(
            format!("could not close borrow of book {} by member {} after {} attempts", book_id, member_id, max_attempts).as_str(),
            Some("retries_exhausted".to_string())))
    }

    async fn report_stock_repair(&self, book_id: i64, reason: &str, err: &LibraryError) {
        let data = HashMap::from([("book_id", book_id.to_string()), ("reason", reason.to_string())]);
        error!(book_id, reason, error = %err, "stock needs repair");
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::repair_needed(
            "stock_repair_needed", "books", book_id.to_string().as_str(), &self.config.event_metadata(), &data)).await;
    }
}

// linear backoff plus jitter, saturating for oversized configured bases
pub(crate) fn backoff_delay(base_ms: u64, attempt: u32, jitter_ms: u64) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(attempt as u64).saturating_add(jitter_ms))
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    async fn borrow(&self, member_id: i64, book_id: i64) -> LibraryResult<BorrowRecordDto> {
        let _ = self.member_repository.get(member_id).await?;
        // checked before the stock CAS and not atomic with the insert: two concurrent
        // borrows of the same pair can both pass, return then closes the earliest
        if !self.open_records(member_id, book_id).await?.is_empty() {
            return Err(LibraryError::conflict(
                format!("member {} already borrows book {}", member_id, book_id).as_str(),
                Some("duplicate_open_loan".to_string())));
        }

        let book = self.adjust_stock(book_id, -1).await?;

        match self.borrow_record_repository.create(&BorrowRecordEntity::new(member_id, book_id)).await {
            Ok(record) => {
                info!(record_id = record.record_id, member_id, book_id, stock = book.stock, "book borrowed");
                let dto = BorrowRecordDto::from(&record);
                publish_or_warn(self.events_publisher.as_ref(), DomainEvent::added(
                    "loans", "loans", record.record_id.to_string().as_str(), &self.config.event_metadata(), &dto)).await;
                Ok(dto)
            }
            Err(err) => {
                warn!(member_id, book_id, error = %err, "failed to record loan, restoring stock");
                match self.adjust_stock(book_id, 1).await {
                    Ok(_) => {
                        Err(LibraryError::internal(
                            format!("failed to record loan of book {} for member {}: {}", book_id, member_id, err).as_str(),
                            Some("stock_restored".to_string())))
                    }
                    Err(restore_err) => {
                        self.report_stock_repair(book_id, "borrow_rollback_failed", &restore_err).await;
                        Err(LibraryError::internal(
                            format!("failed to record loan of book {} for member {}: {}; restoring stock failed: {}",
                                    book_id, member_id, err, restore_err).as_str(),
                            Some("compensation_failed".to_string())))
                    }
                }
            }
        }
    }

    async fn return_book(&self, member_id: i64, book_id: i64) -> LibraryResult<ReturnReceipt> {
        let record = self.close_record(member_id, book_id).await?;
        let dto = BorrowRecordDto::from(&record);

        let status = match self.adjust_stock(book_id, 1).await {
            Ok(book) => {
                info!(record_id = record.record_id, member_id, book_id, stock = book.stock, "book returned");
                ReturnStatus::Completed
            }
            Err(err) => {
                self.report_stock_repair(book_id, "return_not_restocked", &err).await;
                ReturnStatus::StockNotRestored
            }
        };
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::updated(
            "loans", "loans", record.record_id.to_string().as_str(), &self.config.event_metadata(), &dto)).await;
        Ok(ReturnReceipt::new(dto, status))
    }
}
