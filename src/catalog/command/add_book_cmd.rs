use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) author: String,
    #[serde(default)]
    pub(crate) category: String,
    pub(crate) stock: Option<i64>,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, category: &str, stock: Option<i64>) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(req.title.as_str(), req.author.as_str(), req.category.as_str(), req.stock)
            .await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::store::factory::Repositories;

    lazy_static! {
        static ref SUT_CMD: AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let repos = Repositories::memory().await;
                let publisher = create_publisher(GatewayPublisherVia::Logs).await;
                AddBookCommand::new(factory::create_catalog_service(&Configuration::new("test"), &repos, publisher))
            });
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = SUT_CMD.get().await;

        let res = cmd.execute(AddBookCommandRequest::new("Dune", "Frank Herbert", "SciFi", Some(2)))
            .await.expect("should add book");
        assert_eq!("Dune", res.book.title.as_str());
        assert_eq!(2, res.book.stock);

        let req: AddBookCommandRequest = serde_json::from_str(r#"{"title":"Emma"}"#).expect("should parse request");
        let res = cmd.execute(req).await.expect("should add book with defaults");
        assert_eq!(1, res.book.stock);

        let res = cmd.execute(AddBookCommandRequest::new("Dune", "Frank Herbert", "SciFi", Some(-2))).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
