pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use app::{router, AppState};
pub use error::ApiError;
