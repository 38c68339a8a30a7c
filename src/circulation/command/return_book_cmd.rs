use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::ReturnReceipt;
use crate::core::command::{Command, CommandError};

pub(crate) struct ReturnBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub(crate) member_id: i64,
    pub(crate) book_id: i64,
}

impl ReturnBookCommandRequest {
    pub fn new(member_id: i64, book_id: i64) -> Self {
        Self {
            member_id,
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    #[serde(flatten)]
    pub receipt: ReturnReceipt,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.circulation_service.return_book(req.member_id, req.book_id)
            .await.map_err(CommandError::from).map(|receipt| ReturnBookCommandResponse { receipt })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::domain::model::BookEntity;
    use crate::circulation::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::circulation::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::members::domain::model::MemberEntity;
    use crate::store::factory::Repositories;
    use crate::store::flaky::FlakyRepository;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let repos = Repositories::memory().await;
        let publisher = create_publisher(GatewayPublisherVia::Logs).await;
        let config = Configuration::new("test");
        let svc = factory::create_circulation_service(&config, &repos, publisher);
        let book = repos.books.create(&BookEntity::new("Dune", "Frank Herbert", "SciFi", 1)).await.expect("should create book");
        let member = repos.members.create(&MemberEntity::new("Ada", "ada@example.com")).await.expect("should create member");
        let _ = svc.borrow(member.member_id, book.book_id).await.expect("should borrow");
        let cmd = ReturnBookCommand::new(svc);

        let res = cmd.execute(ReturnBookCommandRequest::new(member.member_id, book.book_id)).await.expect("should return");
        let json = serde_json::to_value(&res).expect("should serialize");
        assert_eq!("Completed", json["status"]);
        assert_eq!("Closed", json["record"]["status"]);

        let res = cmd.execute(ReturnBookCommandRequest::new(member.member_id, book.book_id)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_report_return_without_restock() {
        let memory = Repositories::memory().await;
        let repos = Repositories {
            books: Arc::new(FlakyRepository::<BookEntity>::new(false, true)),
            ..memory
        };
        let publisher = create_publisher(GatewayPublisherVia::Logs).await;
        let svc = factory::create_circulation_service(&Configuration::new("test"), &repos, publisher);
        let book = repos.books.create(&BookEntity::new("Dune", "Frank Herbert", "SciFi", 1)).await.expect("should create book");
        let member = repos.members.create(&MemberEntity::new("Ada", "ada@example.com")).await.expect("should create member");
        let _ = svc.borrow(member.member_id, book.book_id).await.expect("should borrow");
        let cmd = ReturnBookCommand::new(svc);

        let res = cmd.execute(ReturnBookCommandRequest::new(member.member_id, book.book_id)).await.expect("loan is closed");
        assert!(!res.receipt.is_complete());
        let json = serde_json::to_value(&res).expect("should serialize");
        assert_eq!("StockNotRestored", json["status"]);
        assert_eq!("Closed", json["record"]["status"]);
        assert_eq!(0, repos.books.get(book.book_id).await.expect("should get book").stock);
    }
}
