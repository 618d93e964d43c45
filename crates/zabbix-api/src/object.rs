//! Method proxy for one API object.

use serde_json::Value;
use zabbix_transport::Transport;

use crate::{ApiError, ZabbixApi};

/// Calls `<object>.<method>` on a client, e.g. `host.get`.
///
/// ```rust,no_run
/// # async fn run(api: zabbix_api::HttpZabbixApi) -> Result<(), zabbix_api::ApiError> {
/// let hosts = api
///     .object("host")
///     .call("get", serde_json::json!({"output": ["hostid", "name"]}))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiObject<'a, T: Transport> {
    api: &'a ZabbixApi<T>,
    name: String,
}

impl<'a, T: Transport> ApiObject<'a, T> {
    pub(crate) fn new(api: &'a ZabbixApi<T>, name: String) -> Self {
        Self { api, name }
    }

    /// The object name, e.g. `host`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls `method` on this object and returns the `result`.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ApiError> {
        let full = format!("{}.{method}", self.name);
        self.api.call(&full, params).await
    }
}
