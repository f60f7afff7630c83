pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod permissions;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
