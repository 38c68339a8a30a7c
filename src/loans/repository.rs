use crate::core::repository::Repository;
use crate::loans::domain::model::BorrowRecordEntity;

pub type BorrowRecordRepository = dyn Repository<BorrowRecordEntity>;
