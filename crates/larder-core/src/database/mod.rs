pub mod connection;
pub mod models;
pub mod schema;
pub mod store;
