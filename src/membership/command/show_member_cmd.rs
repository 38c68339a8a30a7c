use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::membership::domain::MembershipService;
use crate::membership::dto::MemberHistoryDto;

pub(crate) struct ShowMemberCommand {
    membership_service: Box<dyn MembershipService>,
}

impl ShowMemberCommand {
    pub(crate) fn new(membership_service: Box<dyn MembershipService>) -> Self {
        Self {
            membership_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowMemberCommandRequest {
    pub(crate) member_id: i64,
}

impl ShowMemberCommandRequest {
    pub fn new(member_id: i64) -> Self {
        Self {
            member_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ShowMemberCommandResponse {
    #[serde(flatten)]
    pub history: MemberHistoryDto,
}

#[async_trait]
impl Command<ShowMemberCommandRequest, ShowMemberCommandResponse> for ShowMemberCommand {
    async fn execute(&self, req: ShowMemberCommandRequest) -> Result<ShowMemberCommandResponse, CommandError> {
        self.membership_service.show_member(req.member_id)
            .await.map_err(CommandError::from).map(|history| ShowMemberCommandResponse { history })
    }
}
