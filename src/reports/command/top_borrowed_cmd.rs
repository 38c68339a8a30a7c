use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportingService;
use crate::reports::dto::TopBorrowedRow;

pub(crate) struct TopBorrowedCommand {
    reporting_service: Box<dyn ReportingService>,
}

impl TopBorrowedCommand {
    pub(crate) fn new(reporting_service: Box<dyn ReportingService>) -> Self {
        Self {
            reporting_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopBorrowedCommandRequest {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl TopBorrowedCommandRequest {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TopBorrowedCommandResponse {
    pub books: Vec<TopBorrowedRow>,
}

#[async_trait]
impl Command<TopBorrowedCommandRequest, TopBorrowedCommandResponse> for TopBorrowedCommand {
    async fn execute(&self, req: TopBorrowedCommandRequest) -> Result<TopBorrowedCommandResponse, CommandError> {
        self.reporting_service.top_borrowed(req.limit)
            .await.map_err(CommandError::from).map(|books| TopBorrowedCommandResponse { books })
    }
}
