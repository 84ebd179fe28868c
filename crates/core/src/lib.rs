pub mod config;
pub mod content;
pub mod error;
pub mod types;

pub use config::parse_site_toml;
pub use content::load_posts;
pub use error::{Error, Result};
pub use types::*;
