pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryResult, SearchField};

#[async_trait]
pub trait CatalogService: Sync + Send {
    // stock defaults to the configured default_stock
    async fn add_book(&self, title: &str, author: &str, category: &str, stock: Option<i64>) -> LibraryResult<BookDto>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn search_books(&self, term: &str, field: SearchField) -> LibraryResult<Vec<BookDto>>;
    async fn find_book(&self, id: i64) -> LibraryResult<BookDto>;
    async fn update_stock(&self, id: i64, stock: i64) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: i64) -> LibraryResult<()>;
}
