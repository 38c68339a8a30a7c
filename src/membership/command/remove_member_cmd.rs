use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::membership::domain::MembershipService;

pub(crate) struct RemoveMemberCommand {
    membership_service: Box<dyn MembershipService>,
}

impl RemoveMemberCommand {
    pub(crate) fn new(membership_service: Box<dyn MembershipService>) -> Self {
        Self {
            membership_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveMemberCommandRequest {
    pub(crate) member_id: i64,
}

impl RemoveMemberCommandRequest {
    pub fn new(member_id: i64) -> Self {
        Self {
            member_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveMemberCommandResponse {
    pub member_id: i64,
}

#[async_trait]
impl Command<RemoveMemberCommandRequest, RemoveMemberCommandResponse> for RemoveMemberCommand {
    async fn execute(&self, req: RemoveMemberCommandRequest) -> Result<RemoveMemberCommandResponse, CommandError> {
        self.membership_service.remove_member(req.member_id)
            .await.map_err(CommandError::from).map(|_| RemoveMemberCommandResponse { member_id: req.member_id })
    }
}
