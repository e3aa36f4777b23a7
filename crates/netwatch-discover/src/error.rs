//! Error types for the netwatch-discover crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Command not found or not executable: {command}")]
    CommandNotFound { command: String },

    #[error("Command `{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to parse command output: {0}")]
    Parse(String),

    #[error("Failed to parse nmap XML output: {0}")]
    XmlParse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned non-2xx status {status}: {body}")]
    WebhookStatus { status: u16, body: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DiscoverError>;
