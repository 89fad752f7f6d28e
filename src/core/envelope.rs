use crate::core::classifier::AttemptFailure;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 上游統一的 `{data, status, error}` 包裝
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// 取出 `data`，缺值視為解碼失敗
    pub fn into_data(self) -> Result<T, AttemptFailure> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(AttemptFailure::Decode {
                reason: match self.error {
                    Some(error) => format!("envelope has no data (upstream error: {})", error),
                    None => "envelope has no data".to_string(),
                },
            }),
        }
    }
}

impl<T> ResponseEnvelope<Vec<T>> {
    /// 集合型 payload：沒有 data 即為空集合
    pub fn into_list(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<ResponseEnvelope<T>, AttemptFailure> {
    serde_json::from_slice(body).map_err(|e| AttemptFailure::Decode {
        reason: format!("malformed response envelope: {}", e),
    })
}
