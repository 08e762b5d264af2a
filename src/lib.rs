// fh2-transfer - role-assumed media upload with completion notification

pub mod broker;
pub mod config;
pub mod logging;
pub mod notifier;
pub mod pipeline;
pub mod types;
pub mod uploader;

// Re-exports for convenience
pub use config::Config;
pub use pipeline::Pipeline;
pub use types::{Error, Result};
