use crate::adapters::http::ReqwestTransport;
use crate::core::aggregate::{self, DEFAULT_TOP_EARNERS};
use crate::core::classifier::ClassifiedError;
use crate::core::retry::RetryingClient;
use crate::domain::model::{DeleteEmployeeRequest, EmployeeInput, EmployeeRecord, RetryPolicy};
use crate::domain::ports::{ApiRequest, ConfigProvider, Transport};
use crate::utils::error::{DirectoryError, Result};
use url::Url;

/// 員工目錄服務：所有資料都來自上游 API
pub struct EmployeeDirectory<T: Transport> {
    client: RetryingClient<T>,
    base: Url,
}

impl EmployeeDirectory<ReqwestTransport> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let transport = ReqwestTransport::new(config.transport_settings())?;
        Self::new(transport, config.base_url(), config.retry_policy())
    }
}

impl<T: Transport> EmployeeDirectory<T> {
    pub fn new(transport: T, base_url: &str, policy: RetryPolicy) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| DirectoryError::ConfigError {
            message: format!("Invalid upstream base URL '{}': {}", base_url, e),
        })?;
        if base.cannot_be_a_base() {
            return Err(DirectoryError::ConfigError {
                message: format!("Upstream base URL '{}' cannot carry a path", base_url),
            });
        }
        Ok(Self {
            client: RetryingClient::new(transport, policy),
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn employee_url(&self, id: &str) -> String {
        let mut url = self.base.clone();
        // new() 已排除 cannot-be-a-base
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url.to_string()
    }

    fn fail(&self, error: ClassifiedError, action: &str, lookup_id: Option<&str>) -> DirectoryError {
        tracing::error!("{} ({:?}): {}", action, error.kind, error.detail);
        error.into_directory_error(action, lookup_id)
    }

    pub async fn get_all(&self) -> Result<Vec<EmployeeRecord>> {
        tracing::info!("Fetching all employees");
        let envelope = self
            .client
            .call::<Vec<EmployeeRecord>>(&ApiRequest::get(self.base_url()))
            .await
            .map_err(|e| self.fail(e, "Failed to fetch employees", None))?;

        let employees = envelope.into_list();
        tracing::info!("Successfully fetched {} employees", employees.len());
        Ok(employees)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<EmployeeRecord> {
        tracing::info!("Fetching employee by ID: {}", id);
        let employee = self
            .client
            .call::<EmployeeRecord>(&ApiRequest::get(self.employee_url(id)))
            .await
            .and_then(|envelope| envelope.into_data().map_err(ClassifiedError::from))
            .map_err(|e| self.fail(e, "Failed to fetch employee", Some(id)))?;

        tracing::info!("Successfully fetched employee with ID: {}", id);
        Ok(employee)
    }

    pub async fn search(&self, fragment: &str) -> Result<Vec<EmployeeRecord>> {
        tracing::info!("Searching employees by name: {}", fragment);
        let matches = aggregate::search_by_name(self.get_all().await?, fragment);
        tracing::info!("Found {} employees matching search: {}", matches.len(), fragment);
        Ok(matches)
    }

    pub async fn highest_salary(&self) -> Result<u64> {
        tracing::info!("Finding highest salary among all employees");
        let highest = aggregate::highest_salary(&self.get_all().await?);
        tracing::info!("Highest salary found: {}", highest);
        Ok(highest)
    }

    pub async fn top_earning_names(&self, limit: usize) -> Result<Vec<String>> {
        tracing::info!("Finding top {} highest earning employees", limit);
        let names = aggregate::top_earning_names(self.get_all().await?, limit);
        tracing::info!("Found {} top earning employees", names.len());
        Ok(names)
    }

    pub async fn top_ten_earning_names(&self) -> Result<Vec<String>> {
        self.top_earning_names(DEFAULT_TOP_EARNERS).await
    }

    /// 上游的回應為準，即使本地驗證已通過
    pub async fn create(&self, input: &EmployeeInput) -> Result<EmployeeRecord> {
        tracing::info!("Creating new employee: {}", input.name);
        let body = serde_json::to_value(input)?;
        let created = self
            .client
            .call::<EmployeeRecord>(&ApiRequest::post(self.base_url(), body))
            .await
            .and_then(|envelope| envelope.into_data().map_err(ClassifiedError::from))
            .map_err(|e| self.fail(e, "Failed to create employee", None))?;

        tracing::info!("Successfully created employee with ID: {}", created.id);
        Ok(created)
    }

    /// 先以 ID 查出姓名，再以姓名刪除。
    /// 兩次呼叫之間若姓名改變或上游有同名員工，刪除的可能不是同一筆。
    pub async fn delete_by_id(&self, id: &str) -> Result<String> {
        tracing::info!("Deleting employee by ID: {}", id);
        let employee = self.get_by_id(id).await?;

        let name = employee.name.ok_or_else(|| DirectoryError::ExternalFailure {
            message: format!("Failed to delete employee: record {} has no name", id),
            retryable: false,
        })?;

        let body = serde_json::to_value(DeleteEmployeeRequest { name: name.clone() })?;
        let envelope = self
            .client
            .call::<bool>(&ApiRequest::delete(self.base_url(), body))
            .await
            .map_err(|e| self.fail(e, "Failed to delete employee", None))?;

        match envelope.data {
            Some(true) => {
                tracing::info!("Successfully deleted employee: {}", name);
                Ok(name)
            }
            other => {
                tracing::error!("Upstream did not confirm deletion of {}: {:?}", name, other);
                Err(DirectoryError::ExternalFailure {
                    message: format!(
                        "Failed to delete employee: upstream returned data {:?}",
                        other
                    ),
                    retryable: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::ScriptedTransport;
    use reqwest::Method;
    use serde_json::json;
    use std::time::Duration;

    const BASE_URL: &str = "http://upstream.test/api/v1/employee";

    fn directory(transport: ScriptedTransport) -> EmployeeDirectory<ScriptedTransport> {
        EmployeeDirectory::new(
            transport,
            BASE_URL,
            RetryPolicy::new(Duration::from_millis(10), 2.0),
        )
        .unwrap()
    }

    fn jane() -> serde_json::Value {
        json!({"id": "42", "employee_name": "Jane", "employee_salary": 75000,
               "employee_age": 40, "employee_title": "CTO"})
    }

    fn collection() -> crate::core::testing::Scripted {
        ScriptedTransport::json(
            200,
            json!({"data": [
                {"id": "1", "employee_name": "Jane", "employee_salary": 75000},
                {"id": "2", "employee_name": "Bob", "employee_salary": 60000},
                {"id": "3", "employee_name": "John", "employee_salary": 50000}
            ], "status": "ok"}),
        )
    }

    #[test]
    fn test_employee_url_appends_id() {
        let directory = directory(ScriptedTransport::default());
        assert_eq!(directory.employee_url("42"), format!("{}/42", BASE_URL));

        let trailing = EmployeeDirectory::new(
            ScriptedTransport::default(),
            "http://upstream.test/employee/",
            RetryPolicy::default(),
        )
        .unwrap();
        assert_eq!(trailing.employee_url("a b"), "http://upstream.test/employee/a%20b");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = EmployeeDirectory::new(
            ScriptedTransport::default(),
            "not a url",
            RetryPolicy::default(),
        );
        assert!(matches!(result, Err(DirectoryError::ConfigError { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aggregations_over_fetched_collection() {
        let transport = ScriptedTransport::new(vec![collection(), collection(), collection()]);
        let directory = directory(transport.clone());

        assert_eq!(directory.highest_salary().await.unwrap(), 75000);
        assert_eq!(directory.top_earning_names(2).await.unwrap(), vec!["Jane", "Bob"]);
        let found = directory.search("jo").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");

        let requests = transport.requests().await;
        assert!(requests.iter().all(|r| r.method == Method::GET && r.url == BASE_URL));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aggregation_fails_whole_when_fetch_fails() {
        let transport = ScriptedTransport::new(vec![
            ScriptedTransport::status(500),
            ScriptedTransport::status(500),
            ScriptedTransport::status(500),
        ]);
        let directory = directory(transport);

        let err = directory.highest_salary().await.unwrap_err();
        assert!(matches!(err, DirectoryError::ExternalFailure { retryable: true, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_not_found_carries_id() {
        let transport = ScriptedTransport::new(vec![ScriptedTransport::status(404)]);
        let directory = directory(transport.clone());

        let err = directory.get_by_id("missing").await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { ref id } if id == "missing"));
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_without_data_is_external_failure() {
        let transport = ScriptedTransport::new(vec![ScriptedTransport::json(
            200,
            json!({"data": null, "status": "Successfully processed request."}),
        )]);
        let directory = directory(transport.clone());

        let err = directory.get_by_id("42").await.unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::ExternalFailure {
                retryable: false,
                ..
            }
        ));
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_posts_input_and_decodes_record() {
        let transport = ScriptedTransport::new(vec![ScriptedTransport::json(
            200,
            json!({"data": jane(), "status": "ok"}),
        )]);
        let directory = directory(transport.clone());
        let input = EmployeeInput {
            name: "Jane".to_string(),
            salary: 75000,
            age: 40,
            title: "CTO".to_string(),
        };

        let created = directory.create(&input).await.unwrap();
        assert_eq!(created.id, "42");

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].body,
            Some(json!({"name": "Jane", "salary": 75000, "age": 40, "title": "CTO"}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_without_data_is_external_failure() {
        let transport = ScriptedTransport::new(vec![ScriptedTransport::json(
            200,
            json!({"status": "Successfully processed request."}),
        )]);
        let directory = directory(transport.clone());
        let input = EmployeeInput {
            name: "Jane".to_string(),
            salary: 75000,
            age: 40,
            title: "CTO".to_string(),
        };

        let err = directory.create(&input).await.unwrap_err();
        assert!(matches!(err, DirectoryError::ExternalFailure { .. }));
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_resolves_name_before_deleting() {
        let transport = ScriptedTransport::new(vec![
            ScriptedTransport::json(200, json!({"data": jane(), "status": "ok"})),
            ScriptedTransport::json(200, json!({"data": true, "status": "ok"})),
        ]);
        let directory = directory(transport.clone());

        assert_eq!(directory.delete_by_id("42").await.unwrap(), "Jane");

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url, format!("{}/42", BASE_URL));
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].url, BASE_URL);
        assert_eq!(requests[1].body, Some(json!({"name": "Jane"})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_requires_true_confirmation() {
        for data in [json!(false), serde_json::Value::Null] {
            let transport = ScriptedTransport::new(vec![
                ScriptedTransport::json(200, json!({"data": jane()})),
                ScriptedTransport::json(200, json!({"data": data, "status": "ok"})),
            ]);
            let directory = directory(transport);

            let err = directory.delete_by_id("42").await.unwrap_err();
            assert!(matches!(err, DirectoryError::ExternalFailure { .. }));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_of_missing_employee_never_sends_delete() {
        let transport = ScriptedTransport::new(vec![ScriptedTransport::status(404)]);
        let directory = directory(transport.clone());

        let err = directory.delete_by_id("9").await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));

        let requests = transport.requests().await;
        assert!(requests.iter().all(|r| r.method != Method::DELETE));
    }
}
