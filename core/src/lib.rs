pub mod error;
pub mod models;
pub mod service;
pub mod store;
