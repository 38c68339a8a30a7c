use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::membership::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest, AddMemberCommandResponse};
use crate::membership::command::remove_member_cmd::{RemoveMemberCommand, RemoveMemberCommandRequest, RemoveMemberCommandResponse};
use crate::membership::command::show_member_cmd::{ShowMemberCommand, ShowMemberCommandRequest, ShowMemberCommandResponse};
use crate::membership::command::update_email_cmd::{UpdateEmailCommand, UpdateEmailCommandRequest, UpdateEmailCommandResponse};
use crate::membership::domain::MembershipService;
use crate::membership::factory;

fn build_service(state: &AppState) -> Box<dyn MembershipService> {
    factory::create_membership_service(&state.config, &state.repos, state.publisher.clone())
}

pub(crate) async fn add_member(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddMemberCommandResponse>, ServerError> {
    let req: AddMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddMemberCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn show_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<ShowMemberCommandResponse>, ServerError> {
    let req = ShowMemberCommandRequest::new(member_id);
    let res = ShowMemberCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_email(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    json: Json<Value>) -> Result<Json<UpdateEmailCommandResponse>, ServerError> {
    let mut req: UpdateEmailCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.member_id = member_id;
    let res = UpdateEmailCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<RemoveMemberCommandResponse>, ServerError> {
    let req = RemoveMemberCommandRequest::new(member_id);
    let res = RemoveMemberCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}
