use axum::{
    routing::{get, post, put},
    Router,
};
use crate::catalog::controller::{add_book, find_book_by_id, list_books, remove_book, search_books, update_stock};
use crate::circulation::controller::{borrow_book, return_book};
use crate::core::controller::AppState;
use crate::membership::controller::{add_member, remove_member, show_member, update_email};
use crate::reports::controller::{borrows_per_member, overdue_members, top_borrowed};

pub fn app(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/books", post(add_book).get(list_books))
        .route("/books/search", get(search_books))
        .route("/books/:id", get(find_book_by_id).delete(remove_book))
        .route("/books/:id/stock", put(update_stock))
        .route("/members", post(add_member))
        .route("/members/:id", get(show_member).delete(remove_member))
        .route("/members/:id/email", put(update_email))
        .route("/loans/borrow", post(borrow_book))
        .route("/loans/return", post(return_book))
        .route("/reports/top-borrowed", get(top_borrowed))
        .route("/reports/overdue", get(overdue_members))
        .route("/reports/borrows-per-member", get(borrows_per_member))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::core::controller::AppState;
    use crate::core::repository::RepositoryStore;
    use crate::routes::app;

    #[tokio::test]
    async fn test_should_build_router() {
        let state = AppState::new("test", RepositoryStore::Memory).await;
        let _ = app(state);
    }
}
