/// Build the reqwest client used for all remote calls.
///
/// No request timeout is set: a hung remote call blocks that tool call until
/// the peer gives up.
pub fn make_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("linkedin-mcp-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    #[test]
    fn it_builds_a_client() {
        assert!(super::make_http_client().is_ok());
    }
}
