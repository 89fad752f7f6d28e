pub mod aggregate;
pub mod classifier;
pub mod directory;
pub mod envelope;
pub mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{EmployeeInput, EmployeeRecord, RetryPolicy, TransportSettings};
pub use crate::domain::ports::{ApiRequest, ConfigProvider, RawResponse, Transport, TransportFailure};
pub use crate::utils::error::Result;
