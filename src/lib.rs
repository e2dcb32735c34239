pub mod api;
pub mod config;
pub mod error;
pub mod runner;
pub mod service;
pub mod types;

pub use config::Config;
pub use error::HandoffError;
pub use runner::run;
