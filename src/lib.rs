pub mod books;
pub mod catalog;
pub mod circulation;
pub mod core;
pub mod gateway;
pub mod guard;
pub mod loans;
pub mod members;
pub mod membership;
pub mod reports;
pub mod routes;
pub mod store;
pub mod utils;
