use crate::domain::model::{RetryPolicy, TransportSettings};
use async_trait::async_trait;
use reqwest::Method;

/// 單次上游請求的描述
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn delete(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::DELETE,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// 已收到的 HTTP 回應（任何狀態碼）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 在收到回應之前就失敗（連線、逾時等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub message: String,
    pub timeout: bool,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn transport_settings(&self) -> TransportSettings;
    fn retry_policy(&self) -> RetryPolicy;
}
