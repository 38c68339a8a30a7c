use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportingService;
use crate::reports::dto::MemberBorrowsRow;

pub(crate) struct BorrowsPerMemberCommand {
    reporting_service: Box<dyn ReportingService>,
}

impl BorrowsPerMemberCommand {
    pub(crate) fn new(reporting_service: Box<dyn ReportingService>) -> Self {
        Self {
            reporting_service,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowsPerMemberCommandResponse {
    pub members: Vec<MemberBorrowsRow>,
}

#[async_trait]
impl Command<(), BorrowsPerMemberCommandResponse> for BorrowsPerMemberCommand {
    async fn execute(&self, _req: ()) -> Result<BorrowsPerMemberCommandResponse, CommandError> {
        self.reporting_service.borrows_per_member()
            .await.map_err(CommandError::from).map(|members| BorrowsPerMemberCommandResponse { members })
    }
}
