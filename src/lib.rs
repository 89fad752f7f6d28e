pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http::ReqwestTransport;
pub use config::DirectoryConfig;
pub use crate::core::{directory::EmployeeDirectory, envelope::ResponseEnvelope, retry::RetryingClient};
pub use domain::model::{EmployeeInput, EmployeeRecord, RetryPolicy, TransportSettings};
pub use utils::error::{DirectoryError, ErrorKind, Result};
