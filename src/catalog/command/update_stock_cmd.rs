use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateStockCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateStockCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateStockCommandRequest {
    #[serde(default)]
    pub(crate) book_id: i64,
    pub(crate) stock: i64,
}

impl UpdateStockCommandRequest {
    pub fn new(book_id: i64, stock: i64) -> Self {
        Self {
            book_id,
            stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateStockCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<UpdateStockCommandRequest, UpdateStockCommandResponse> for UpdateStockCommand {
    async fn execute(&self, req: UpdateStockCommandRequest) -> Result<UpdateStockCommandResponse, CommandError> {
        self.catalog_service.update_stock(req.book_id, req.stock)
            .await.map_err(CommandError::from).map(|book| UpdateStockCommandResponse { book })
    }
}
