//! Lists users through the API, authenticating with a token.
//!
//! ```text
//! ZABBIX_URL=https://zabbix.example.com ZABBIX_TOKEN=... \
//!     RUST_LOG=zabbix_api=debug cargo run -p auth-by-token
//! ```

use serde_json::json;
use tracing_subscriber::EnvFilter;
use zabbix_api::prelude::*;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api = ZabbixApiBuilder::from_env().build().await?;
    tracing::info!(version = %api.version(), endpoint = api.endpoint(), "connected");

    let users = api
        .scoped(async |api: &mut HttpZabbixApi| {
            api.object("user")
                .call("get", json!({"output": ["userid", "name"]}))
                .await
        })
        .await?;

    for user in users.as_array().into_iter().flatten() {
        println!(
            "{}: {}",
            user["userid"].as_str().unwrap_or("?"),
            user["name"].as_str().unwrap_or("")
        );
    }

    Ok(())
}
