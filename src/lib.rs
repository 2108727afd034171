pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod stopwatch;
pub mod text;

pub use config::ReviewConfig;
pub use database::Database;
pub use error::{Result, ReviewError};
pub use models::{Card, Grade, Interval};
pub use scheduler::Sm2Scheduler;
pub use session::{ReviewSessionController, SessionState, ViewState};
