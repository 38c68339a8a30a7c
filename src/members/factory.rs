use std::sync::Arc;
use crate::core::repository::RepositoryStore;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::store::factory::create_repository;

pub async fn create_member_repository(store: RepositoryStore) -> Arc<MemberRepository> {
    create_repository::<MemberEntity>(store).await
}
