pub mod client;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod query;
pub mod services;

pub use error::AppError;
