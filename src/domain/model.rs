use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MIN_EMPLOYEE_AGE: u32 = 16;
pub const MAX_EMPLOYEE_AGE: u32 = 75;

/// 上游回傳的員工資料，欄位名稱依上游慣例
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    #[serde(rename = "employee_name", default)]
    pub name: Option<String>,
    #[serde(rename = "employee_salary", default)]
    pub salary: Option<u64>,
    // 年齡範圍由上游把關
    #[serde(rename = "employee_age", default)]
    pub age: Option<i64>,
    #[serde(rename = "employee_title", default)]
    pub title: Option<String>,
    #[serde(
        rename = "employee_email",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
}

/// 建立員工的請求內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: u64,
    pub age: u32,
    pub title: String,
}

impl Validate for EmployeeInput {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_positive_number("salary", self.salary, 1)?;
        validate_range("age", self.age, MIN_EMPLOYEE_AGE, MAX_EMPLOYEE_AGE)?;
        validate_non_empty_string("title", &self.title)?;
        Ok(())
    }
}

/// 上游刪除以姓名為鍵
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteEmployeeRequest {
    pub name: String,
}

/// 重試策略：固定 3 次，延遲依倍率遞增
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    base_delay: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    pub const MAX_ATTEMPTS: u32 = 3;

    pub fn new(base_delay: Duration, multiplier: f64) -> Self {
        Self {
            base_delay,
            multiplier,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        Self::MAX_ATTEMPTS
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// 第 `attempt` 次失敗後的等待時間（attempt 從 1 開始）
    pub fn delay_after(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = self.multiplier.powi(attempt as i32 - 1);
        let nanos = self.base_delay.as_nanos() as f64 * factor;
        Duration::from_nanos(nanos.round().min(u64::MAX as f64) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }
}
