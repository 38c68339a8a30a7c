pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::members::dto::MemberDto;
use crate::membership::dto::MemberHistoryDto;

#[async_trait]
pub trait MembershipService: Sync + Send {
    async fn add_member(&self, name: &str, email: &str) -> LibraryResult<MemberDto>;
    async fn update_email(&self, id: i64, email: &str) -> LibraryResult<MemberDto>;
    async fn show_member(&self, id: i64) -> LibraryResult<MemberHistoryDto>;
    async fn remove_member(&self, id: i64) -> LibraryResult<()>;
}
