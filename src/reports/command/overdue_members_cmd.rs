use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportingService;
use crate::reports::dto::OverdueRow;

pub(crate) struct OverdueMembersCommand {
    reporting_service: Box<dyn ReportingService>,
}

impl OverdueMembersCommand {
    pub(crate) fn new(reporting_service: Box<dyn ReportingService>) -> Self {
        Self {
            reporting_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverdueMembersCommandRequest {
    #[serde(default)]
    pub(crate) days: Option<i64>,
}

impl OverdueMembersCommandRequest {
    pub fn new(days: Option<i64>) -> Self {
        Self {
            days,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OverdueMembersCommandResponse {
    pub overdue: Vec<OverdueRow>,
}

#[async_trait]
impl Command<OverdueMembersCommandRequest, OverdueMembersCommandResponse> for OverdueMembersCommand {
    async fn execute(&self, req: OverdueMembersCommandRequest) -> Result<OverdueMembersCommandResponse, CommandError> {
        self.reporting_service.overdue_members(req.days)
            .await.map_err(CommandError::from).map(|overdue| OverdueMembersCommandResponse { overdue })
    }
}
