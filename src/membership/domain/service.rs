use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{EntityKind, LibraryError, LibraryResult};
use crate::core::repository::{fields, FieldValue, Predicate, UpdateOutcome};
use crate::gateway::events::{publish_or_warn, EventPublisher};
use crate::guard::domain::DeletionGuard;
use crate::loans::dto::BorrowRecordDto;
use crate::loans::repository::BorrowRecordRepository;
use crate::members::domain::model::MemberEntity;
use crate::members::dto::MemberDto;
use crate::members::repository::MemberRepository;
use crate::membership::domain::MembershipService;
use crate::membership::dto::MemberHistoryDto;
use crate::utils::date::now;

pub(crate) struct MembershipServiceImpl {
    config: Configuration,
    member_repository: Arc<MemberRepository>,
    borrow_record_repository: Arc<BorrowRecordRepository>,
    deletion_guard: Box<dyn DeletionGuard>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl MembershipServiceImpl {
    pub(crate) fn new(config: &Configuration, member_repository: Arc<MemberRepository>,
                      borrow_record_repository: Arc<BorrowRecordRepository>,
                      deletion_guard: Box<dyn DeletionGuard>,
                      events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            member_repository,
            borrow_record_repository,
            deletion_guard,
            events_publisher,
        }
    }
}

fn validate_email(email: &str) -> LibraryResult<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace) => Ok(()),
        _ => Err(LibraryError::validation(
            format!("invalid email address {:?}", email).as_str(), Some("400".to_string()))),
    }
}

#[async_trait]
impl MembershipService for MembershipServiceImpl {
    async fn add_member(&self, name: &str, email: &str) -> LibraryResult<MemberDto> {
        if name.trim().is_empty() {
            return Err(LibraryError::validation("member name must not be empty", Some("400".to_string())));
        }
        validate_email(email)?;
        let member = self.member_repository.create(&MemberEntity::new(name.trim(), email.trim())).await?;
        info!(member_id = member.member_id, "member added");
        let dto = MemberDto::from(&member);
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::added(
            "members", "members", member.member_id.to_string().as_str(), &self.config.event_metadata(), &dto)).await;
        Ok(dto)
    }

    async fn update_email(&self, id: i64, email: &str) -> LibraryResult<MemberDto> {
        validate_email(email)?;
        let changes = fields([
            ("email", FieldValue::Text(email.trim().to_string())),
            ("updated_at", FieldValue::Timestamp(now())),
        ]);
        if self.member_repository.update(id, &changes, None).await? == UpdateOutcome::NoChange {
            return Err(LibraryError::not_found(format!("member not found for {}", id).as_str()));
        }
        let member = MemberDto::from(&self.member_repository.get(id).await?);
        info!(member_id = id, "member email updated");
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::updated(
            "members", "members", id.to_string().as_str(), &self.config.event_metadata(), &member)).await;
        Ok(member)
    }

    async fn show_member(&self, id: i64) -> LibraryResult<MemberHistoryDto> {
        let member = self.member_repository.get(id).await?;
        let mut records = self.borrow_record_repository.query_all(
            &[Predicate::equals(EntityKind::Member.loan_field(), id)]).await?;
        records.sort_by_key(|r| (r.borrow_date, r.record_id));
        Ok(MemberHistoryDto {
            member: MemberDto::from(&member),
            borrows: records.iter().map(BorrowRecordDto::from).collect(),
        })
    }

    async fn remove_member(&self, id: i64) -> LibraryResult<()> {
        let _ = self.member_repository.get(id).await?;
        self.deletion_guard.check(EntityKind::Member, id).await?;
        let _ = self.member_repository.delete(id).await?;
        info!(member_id = id, "member removed");
        publish_or_warn(self.events_publisher.as_ref(), DomainEvent::deleted(
            "members", "members", id.to_string().as_str(), &self.config.event_metadata(), &id)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, LoanStatus};
    use crate::core::repository::{fields, FieldValue};
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::loans::domain::model::BorrowRecordEntity;
    use crate::membership::domain::MembershipService;
    use crate::membership::domain::service::validate_email;
    use crate::membership::factory;
    use crate::store::factory::Repositories;
    use crate::utils::date::{days_ago, now};

    lazy_static! {
        static ref REPOS: AsyncOnce<Repositories> = AsyncOnce::new(async {
                Repositories::memory().await
            });
        static ref SUT_SVC: AsyncOnce<Box<dyn MembershipService>> = AsyncOnce::new(async {
                let publisher = create_publisher(GatewayPublisherVia::Logs).await;
                factory::create_membership_service(&Configuration::new("test"), REPOS.get().await, publisher)
            });
    }

    #[tokio::test]
    async fn test_should_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email(" ada@example.com ").is_ok());
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
        assert!(validate_email("a da@example.com").is_err());
    }

    #[tokio::test]
    async fn test_should_add_member() {
        let membership_svc = SUT_SVC.get().await;
        let member = membership_svc.add_member("Ada Lovelace", "ada@example.com").await.expect("should add member");
        assert!(member.member_id > 0);

        let history = membership_svc.show_member(member.member_id).await.expect("should show member");
        assert_eq!(member, history.member);
        assert!(history.borrows.is_empty());

        assert!(matches!(membership_svc.add_member(" ", "x@example.com").await, Err(LibraryError::Validation { .. })));
        assert!(matches!(membership_svc.add_member("Bob", "bob").await, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_update_email() {
        let membership_svc = SUT_SVC.get().await;
        let member = membership_svc.add_member("Grace Hopper", "grace@example.com").await.expect("should add member");

        let updated = membership_svc.update_email(member.member_id, "hopper@navy.mil").await.expect("should update email");
        assert_eq!("hopper@navy.mil", updated.email.as_str());
        assert!(matches!(membership_svc.update_email(member.member_id, "nope").await, Err(LibraryError::Validation { .. })));
        assert!(matches!(membership_svc.update_email(999_999, "x@example.com").await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_show_history_oldest_first() {
        let membership_svc = SUT_SVC.get().await;
        let repos = REPOS.get().await;
        let member = membership_svc.add_member("Alan Turing", "alan@example.com").await.expect("should add member");

        let mut recent = BorrowRecordEntity::new(member.member_id, 2);
        recent.borrow_date = days_ago(1);
        let recent = repos.borrow_records.create(&recent).await.expect("should create record");
        let mut old = BorrowRecordEntity::new(member.member_id, 1);
        old.borrow_date = days_ago(30);
        let old = repos.borrow_records.create(&old).await.expect("should create record");
        let _ = repos.borrow_records.update(old.record_id, &fields([("return_date", FieldValue::Timestamp(now()))]), None)
            .await.expect("should close record");

        let history = membership_svc.show_member(member.member_id).await.expect("should show member");
        let ids: Vec<i64> = history.borrows.iter().map(|b| b.record_id).collect();
        assert_eq!(vec![old.record_id, recent.record_id], ids);
        assert_eq!(LoanStatus::Closed, history.borrows[0].status);
        assert_eq!(1, history.open_loans());

        assert!(matches!(membership_svc.show_member(999_999).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_remove_member_without_open_loans() {
        let membership_svc = SUT_SVC.get().await;
        let repos = REPOS.get().await;
        let member = membership_svc.add_member("Edsger Dijkstra", "ewd@example.com").await.expect("should add member");
        let record = repos.borrow_records.create(&BorrowRecordEntity::new(member.member_id, 5)).await.expect("should create record");

        match membership_svc.remove_member(member.member_id).await {
            Err(LibraryError::Conflict { message, .. }) => assert!(message.contains("1 open")),
            other => panic!("unexpected {:?}", other),
        }

        let _ = repos.borrow_records.update(record.record_id, &fields([("return_date", FieldValue::Timestamp(now()))]), None)
            .await.expect("should close record");
        membership_svc.remove_member(member.member_id).await.expect("should remove member");
        assert!(matches!(membership_svc.show_member(member.member_id).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(membership_svc.remove_member(member.member_id).await, Err(LibraryError::NotFound { .. })));
    }
}
