use crate::{core::config::FetchConfig, core::constants, MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::Value;

/// Shared HTTP client with a custom User-Agent so that the Wikipedia API
/// doesn't reject the request. Building the client once avoids the cost of
/// TLS and connection pool setup for every description.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(constants::USER_AGENT)
        .build()
        .expect("failed to build reqwest client")
});

/// Anything that can produce a short description for a place name.
///
/// The returned future runs on the single-threaded event loop and need not
/// be `Send`.
#[async_trait(?Send)]
pub trait ContentSource {
    /// Look up the description for `query`.
    async fn fetch(&self, query: &str) -> Result<String>;
}

/// Description lookup through the MediaWiki `opensearch` action.
#[derive(Debug, Clone)]
pub struct WikipediaSource {
    client: Client,
    endpoint: String,
}

impl WikipediaSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for WikipediaSource {
    fn default() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            endpoint: constants::WIKIPEDIA_API_URL.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl ContentSource for WikipediaSource {
    async fn fetch(&self, query: &str) -> Result<String> {
        log::debug!("opensearch request for '{}'", query);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "opensearch"), ("search", query), ("format", "json")])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_opensearch(&body)
    }
}

/// Extracts the first description from an `opensearch` response.
///
/// The response is `[query, [titles], [descriptions], [urls]]`. A response
/// without a string at `[2][0]` is rejected as malformed rather than stored.
pub fn parse_opensearch(body: &Value) -> Result<String> {
    body.get(2)
        .and_then(|descriptions| descriptions.get(0))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            MapError::MalformedResponse(format!("no description at [2][0] in {}", body))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_first_description() {
        let body = json!([
            "Het steen",
            ["Het Steen", "Het Steen (Brussels)"],
            ["Het Steen is a medieval fortress in the old city centre of Antwerp.", ""],
            ["https://en.wikipedia.org/wiki/Het_Steen", ""]
        ]);

        assert_eq!(
            parse_opensearch(&body).unwrap(),
            "Het Steen is a medieval fortress in the old city centre of Antwerp."
        );
    }

    #[test]
    fn test_parse_keeps_empty_description() {
        let body = json!(["Het steen", ["Het Steen"], [""], ["https://en.wikipedia.org/wiki/Het_Steen"]]);
        assert_eq!(parse_opensearch(&body).unwrap(), "");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for body in [
            json!(["nothing", [], [], []]),
            json!(["short", []]),
            json!({ "error": { "code": "badvalue" } }),
            json!(["wrong type", [1], [42], [null]]),
        ] {
            assert!(matches!(
                parse_opensearch(&body),
                Err(MapError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_source_uses_configured_endpoint() {
        let config = FetchConfig {
            endpoint: "http://localhost:9/w/api.php".to_string(),
            ..FetchConfig::default()
        };
        let source = WikipediaSource::new(&config).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:9/w/api.php");
        assert_eq!(WikipediaSource::default().endpoint(), constants::WIKIPEDIA_API_URL);
    }
}
