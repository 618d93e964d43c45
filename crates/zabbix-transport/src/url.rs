//! API endpoint URL normalization.

/// The JSON-RPC entry point of the frontend.
pub const JSONRPC_FILE: &str = "api_jsonrpc.php";

/// Turns a loosely written address into the full API endpoint URL.
///
/// - A missing scheme becomes `http://`.
/// - A missing `api_jsonrpc.php` is appended, with exactly one `/`
///   between it and the path.
///
/// ```rust
/// use zabbix_transport::normalize_url;
///
/// assert_eq!(
///     normalize_url("localhost/zabbix"),
///     "http://localhost/zabbix/api_jsonrpc.php",
/// );
/// ```
pub fn normalize_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    if !url.contains("://") {
        url.insert_str(0, "http://");
    }

    if !url.ends_with(JSONRPC_FILE) {
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(JSONRPC_FILE);
    }

    url
}
