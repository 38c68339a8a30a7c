use std::str::FromStr;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::SearchField;

pub(crate) struct SearchBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchBooksCommandRequest {
    #[serde(default)]
    pub(crate) term: String,
    // title, author or category; title when absent
    #[serde(default)]
    pub(crate) field: Option<String>,
}

impl SearchBooksCommandRequest {
    pub fn new(term: &str, field: Option<&str>) -> Self {
        Self {
            term: term.to_string(),
            field: field.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        let field = SearchField::from_str(req.field.as_deref().unwrap_or_default())?;
        self.catalog_service.search_books(req.term.as_str(), field)
            .await.map_err(CommandError::from).map(|books| SearchBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::store::factory::Repositories;

    #[tokio::test]
    async fn test_should_run_search_books() {
        let repos = Repositories::memory().await;
        let publisher = create_publisher(GatewayPublisherVia::Logs).await;
        let svc = factory::create_catalog_service(&Configuration::new("test"), &repos, publisher);
        let _ = svc.add_book("Dune", "Frank Herbert", "SciFi", Some(1)).await.expect("should add book");
        let _ = svc.add_book("Children of Dune", "Frank Herbert", "SciFi", Some(1)).await.expect("should add book");
        let _ = svc.add_book("Emma", "Jane Austen", "Classic", Some(1)).await.expect("should add book");
        let cmd = SearchBooksCommand::new(svc);

        let res = cmd.execute(SearchBooksCommandRequest::new("dune", None)).await.expect("should search");
        assert_eq!(2, res.books.len());
        let res = cmd.execute(SearchBooksCommandRequest::new("AUSTEN", Some("author"))).await.expect("should search");
        assert_eq!(1, res.books.len());
        let res = cmd.execute(SearchBooksCommandRequest::new("classic", Some("category"))).await.expect("should search");
        assert_eq!("Emma", res.books[0].title.as_str());
        let res = cmd.execute(SearchBooksCommandRequest::new("x", Some("isbn"))).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
