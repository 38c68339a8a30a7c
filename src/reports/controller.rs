use axum::{
    extract::{Query, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::reports::command::borrows_per_member_cmd::{BorrowsPerMemberCommand, BorrowsPerMemberCommandResponse};
use crate::reports::command::overdue_members_cmd::{OverdueMembersCommand, OverdueMembersCommandRequest, OverdueMembersCommandResponse};
use crate::reports::command::top_borrowed_cmd::{TopBorrowedCommand, TopBorrowedCommandRequest, TopBorrowedCommandResponse};
use crate::reports::domain::ReportingService;
use crate::reports::factory;

fn build_service(state: &AppState) -> Box<dyn ReportingService> {
    factory::create_reporting_service(&state.config, &state.repos)
}

pub(crate) async fn top_borrowed(
    State(state): State<AppState>,
    Query(req): Query<TopBorrowedCommandRequest>) -> Result<Json<TopBorrowedCommandResponse>, ServerError> {
    let res = TopBorrowedCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn overdue_members(
    State(state): State<AppState>,
    Query(req): Query<OverdueMembersCommandRequest>) -> Result<Json<OverdueMembersCommandResponse>, ServerError> {
    let res = OverdueMembersCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn borrows_per_member(
    State(state): State<AppState>) -> Result<Json<BorrowsPerMemberCommandResponse>, ServerError> {
    let res = BorrowsPerMemberCommand::new(build_service(&state)).execute(()).await?;
    Ok(Json(res))
}
