pub mod loader;
pub mod schema;

pub use loader::{
    load_from_path, load_from_str, locate, resolve, ConfigError, ConfigOrigin, DEFAULT_CONFIG_FILE,
};
pub use schema::{RewriteConfig, ValidationError, ValidationIssue};
