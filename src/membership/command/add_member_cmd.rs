use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::members::dto::MemberDto;
use crate::membership::domain::MembershipService;

pub(crate) struct AddMemberCommand {
    membership_service: Box<dyn MembershipService>,
}

impl AddMemberCommand {
    pub(crate) fn new(membership_service: Box<dyn MembershipService>) -> Self {
        Self {
            membership_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMemberCommandRequest {
    pub(crate) name: String,
    pub(crate) email: String,
}

impl AddMemberCommandRequest {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<AddMemberCommandRequest, AddMemberCommandResponse> for AddMemberCommand {
    async fn execute(&self, req: AddMemberCommandRequest) -> Result<AddMemberCommandResponse, CommandError> {
        self.membership_service.add_member(req.name.as_str(), req.email.as_str())
            .await.map_err(CommandError::from).map(|member| AddMemberCommandResponse { member })
    }
}
