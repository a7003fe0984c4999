use thiserror::Error;

mod app_config;
mod config;
mod enums;
mod game;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use enums::{Difficulty, GameType, PlayTime, SaleCondition};
pub use game::{ExtractedGame, ImportRequest};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
