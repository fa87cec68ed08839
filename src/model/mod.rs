mod config;
mod record;

pub use config::{ConfigError, GroupingConfig, DEFAULT_THRESHOLD};
pub use record::{RecipeId, RecipeRecord, ResultId};
