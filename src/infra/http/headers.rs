use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::RequestBuilder;

use crate::domain::Credential;

pub const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// Generate a simple request id suitable for logging/correlation.
pub fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("li-{}-{}", now.as_secs(), now.subsec_nanos())
}

/// Add the header set every JSON call to the LinkedIn REST API carries.
/// Returns the updated builder and the request id used.
pub fn add_api_headers(
    builder: RequestBuilder,
    credential: &Credential,
    api_version: &str,
) -> (RequestBuilder, String) {
    let rid = generate_request_id();
    let b = builder
        .header(AUTHORIZATION, credential.bearer())
        .header(CONTENT_TYPE, "application/json")
        .header("LinkedIn-Version", api_version)
        .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
        .header("x-request-id", rid.as_str())
        .header(
            USER_AGENT,
            format!("linkedin-mcp-gateway/{}", env!("CARGO_PKG_VERSION")),
        );
    (b, rid)
}

/// Headers for the raw media PUT: bearer auth and an octet-stream body only.
pub fn add_upload_headers(builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
    builder
        .header(AUTHORIZATION, credential.bearer())
        .header(CONTENT_TYPE, "application/octet-stream")
}
