use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::members::dto::MemberDto;
use crate::membership::domain::MembershipService;

pub(crate) struct UpdateEmailCommand {
    membership_service: Box<dyn MembershipService>,
}

impl UpdateEmailCommand {
    pub(crate) fn new(membership_service: Box<dyn MembershipService>) -> Self {
        Self {
            membership_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateEmailCommandRequest {
    #[serde(default)]
    pub(crate) member_id: i64,
    pub(crate) email: String,
}

impl UpdateEmailCommandRequest {
    pub fn new(member_id: i64, email: &str) -> Self {
        Self {
            member_id,
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateEmailCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<UpdateEmailCommandRequest, UpdateEmailCommandResponse> for UpdateEmailCommand {
    async fn execute(&self, req: UpdateEmailCommandRequest) -> Result<UpdateEmailCommandResponse, CommandError> {
        self.membership_service.update_email(req.member_id, req.email.as_str())
            .await.map_err(CommandError::from).map(|member| UpdateEmailCommandResponse { member })
    }
}
