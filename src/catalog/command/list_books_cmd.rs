use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<(), ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ()) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.list_books()
            .await.map_err(CommandError::from).map(|books| ListBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::list_books_cmd::ListBooksCommand;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::store::factory::Repositories;

    #[tokio::test]
    async fn test_should_run_list_books() {
        let repos = Repositories::memory().await;
        let publisher = create_publisher(GatewayPublisherVia::Logs).await;
        let svc = factory::create_catalog_service(&Configuration::new("test"), &repos, publisher.clone());
        for title in ["b", "a", "c"] {
            let _ = svc.add_book(title, "author", "category", Some(1)).await.expect("should add book");
        }
        let cmd = ListBooksCommand::new(svc);
        let res = cmd.execute(()).await.expect("should list books");
        let titles: Vec<&str> = res.books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(vec!["b", "a", "c"], titles);
    }
}
