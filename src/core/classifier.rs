use crate::domain::ports::TransportFailure;
use crate::utils::error::{DirectoryError, ErrorKind};
use thiserror::Error;

/// 單次上游呼叫的失敗結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// 收到回應但狀態碼不是 2xx
    Status { status: u16 },
    /// 連線或逾時，沒有收到回應
    Transport(TransportFailure),
    /// 回應內容無法解成預期的 envelope
    Decode { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub retryable: bool,
}

pub fn classify(failure: &AttemptFailure) -> Classification {
    let (kind, retryable) = match failure {
        AttemptFailure::Status { status: 404 } => (ErrorKind::NotFound, false),
        AttemptFailure::Status { status: 429 } => (ErrorKind::RateLimited, true),
        AttemptFailure::Status { .. } => (ErrorKind::ExternalFailure, true),
        AttemptFailure::Transport(_) => (ErrorKind::ExternalFailure, true),
        AttemptFailure::Decode { .. } => (ErrorKind::ExternalFailure, false),
    };
    Classification { kind, retryable }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub retryable: bool,
    pub detail: String,
}

impl From<AttemptFailure> for ClassifiedError {
    fn from(failure: AttemptFailure) -> Self {
        let Classification { kind, retryable } = classify(&failure);
        let detail = match failure {
            AttemptFailure::Status { status } => format!("upstream returned HTTP {}", status),
            AttemptFailure::Transport(TransportFailure { message, timeout: true }) => {
                format!("upstream timed out: {}", message)
            }
            AttemptFailure::Transport(TransportFailure { message, .. }) => {
                format!("upstream unreachable: {}", message)
            }
            AttemptFailure::Decode { reason } => reason,
        };
        Self {
            kind,
            retryable,
            detail,
        }
    }
}

impl ClassifiedError {
    /// 只有以 ID 查詢的呼叫才帶 `lookup_id`；其餘呼叫的 404 屬於上游失敗
    pub fn into_directory_error(self, action: &str, lookup_id: Option<&str>) -> DirectoryError {
        match (self.kind, lookup_id) {
            (ErrorKind::NotFound, Some(id)) => DirectoryError::NotFound { id: id.to_string() },
            (ErrorKind::NotFound, None) => DirectoryError::ExternalFailure {
                message: format!("{}: {}", action, self.detail),
                retryable: false,
            },
            (ErrorKind::RateLimited, _) => DirectoryError::RateLimited {
                message: format!("{}: {}", action, self.detail),
            },
            (ErrorKind::ExternalFailure, _) => DirectoryError::ExternalFailure {
                message: format!("{}: {}", action, self.detail),
                retryable: self.retryable,
            },
        }
    }
}
