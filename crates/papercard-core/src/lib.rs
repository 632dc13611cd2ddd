pub mod card;
pub mod config;
pub mod display;
pub mod error;
pub mod link;
pub mod loader;
pub mod models;

pub use card::CardView;
pub use config::{AppConfig, LogConfig, UiConfig};
pub use display::{Tag, TagKind};
pub use error::{ExitCode, PaperCardError, Result};
pub use link::{ExternalLink, LinkKind, open_external};
pub use loader::load_papers;
pub use models::*;
