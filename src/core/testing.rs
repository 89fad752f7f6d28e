//! 測試用的腳本式 Transport

use crate::domain::ports::{ApiRequest, RawResponse, Transport, TransportFailure};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub type Scripted = Result<RawResponse, TransportFailure>;

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<(ApiRequest, Instant)>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Scripted {
        Ok(RawResponse {
            status,
            body: body.to_string().into_bytes(),
        })
    }

    pub fn status(status: u16) -> Scripted {
        Ok(RawResponse {
            status,
            body: Vec::new(),
        })
    }

    pub fn unreachable() -> Scripted {
        Err(TransportFailure {
            message: "connection refused".to_string(),
            timeout: false,
        })
    }

    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.calls.lock().await.iter().map(|(r, _)| r.clone()).collect()
    }

    pub async fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().await.iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        self.calls.lock().await.push((request.clone(), Instant::now()));
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {} {}", request.method, request.url))
    }
}
