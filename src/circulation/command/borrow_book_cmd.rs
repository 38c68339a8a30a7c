use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::loans::dto::BorrowRecordDto;

pub(crate) struct BorrowBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub(crate) member_id: i64,
    pub(crate) book_id: i64,
}

impl BorrowBookCommandRequest {
    pub fn new(member_id: i64, book_id: i64) -> Self {
        Self {
            member_id,
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub record: BorrowRecordDto,
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.circulation_service.borrow(req.member_id, req.book_id)
            .await.map_err(CommandError::from).map(|record| BorrowBookCommandResponse { record })
    }
}
