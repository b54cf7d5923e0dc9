pub mod commands;
pub mod config;
pub mod session;

pub use commands::{Command, CommandError};
pub use config::{Config, ConfigError};
pub use session::{Reply, Session};
