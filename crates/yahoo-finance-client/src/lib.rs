//! RapidAPI Yahoo Finance client: fetches the raw `get-financials` payload for a symbol.

pub mod credentials;
pub mod error;

pub use credentials::Credentials;
pub use error::{ClientError, ClientResult};

use std::time::Duration;

use async_trait::async_trait;
use ratio_core::{FinancialsSource, RatioError, RawFinancials};
use reqwest::Client;
use serde_json::Value;

use credentials::{HOST_HEADER, KEY_HEADER};

pub const DEFAULT_BASE_URL: &str = "https://apidojo-yahoo-finance-v1.p.rapidapi.com";
const FINANCIALS_PATH: &str = "/stock/v2/get-financials";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// What the provider sent back.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Empty body: the provider has nothing for this symbol.
    NoData,
    Payload(Value),
}

/// Qualify a ticker with its exchange suffix the way Yahoo expects.
///
/// `US` tickers carry no suffix, every other region needs `.<REGION>`.
pub fn normalize_symbol(symbol: &str, region: &str) -> String {
    let symbol = symbol.trim();
    let suffix = format!(".{region}");
    if region == "US" {
        symbol.strip_suffix(".US").unwrap_or(symbol).to_string()
    } else if symbol.ends_with(&suffix) {
        symbol.to_string()
    } else {
        format!("{symbol}{suffix}")
    }
}

#[derive(Clone)]
pub struct YahooFinanceClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl YahooFinanceClient {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            credentials,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_defaults(credentials: Credentials) -> Self {
        Self::new(credentials, ClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the income statement / balance sheet payload for `symbol` in `region`.
    pub async fn get_financials(&self, symbol: &str, region: &str) -> ClientResult<FetchOutcome> {
        let symbol = normalize_symbol(symbol, region);
        let url = format!("{}{}", self.base_url, FINANCIALS_PATH);
        tracing::debug!("Fetching financials for {} ({})", symbol, region);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str()), ("region", region)])
            .header(KEY_HEADER, &self.credentials.api_key)
            .header(HOST_HEADER, &self.credentials.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            tracing::warn!("Empty financials response for {}", symbol);
            return Ok(FetchOutcome::NoData);
        }

        Ok(FetchOutcome::Payload(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl FinancialsSource for YahooFinanceClient {
    async fn fetch_financials(
        &self,
        symbol: &str,
        region: &str,
    ) -> Result<Option<RawFinancials>, RatioError> {
        match self.get_financials(symbol, region).await {
            Ok(FetchOutcome::NoData) => Ok(None),
            Ok(FetchOutcome::Payload(value)) => RawFinancials::from_value(value).map(Some),
            Err(e) => Err(RatioError::Source(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> YahooFinanceClient {
        YahooFinanceClient::new(
            Credentials::new("test-key", "test-host"),
            ClientConfig {
                base_url: server.uri(),
                timeout: Duration::from_secs(5),
            },
        )
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("AAPL.US", "US"), "AAPL");
        assert_eq!(normalize_symbol("AAPL", "US"), "AAPL");
        assert_eq!(normalize_symbol("AJBU", "SI"), "AJBU.SI");
        assert_eq!(normalize_symbol("AJBU.SI", "SI"), "AJBU.SI");
        assert_eq!(normalize_symbol(" D05 ", "SI"), "D05.SI");
    }

    #[tokio::test]
    async fn test_get_financials_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FINANCIALS_PATH))
            .and(query_param("symbol", "AJBU.SI"))
            .and(query_param("region", "SI"))
            .and(header(KEY_HEADER, "test-key"))
            .and(header(HOST_HEADER, "test-host"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"incomeStatementHistory": {"incomeStatementHistory": []}}"#,
            ))
            .mount(&server)
            .await;

        let outcome = client_for(&server).get_financials("AJBU", "SI").await.unwrap();
        match outcome {
            FetchOutcome::Payload(value) => {
                assert!(value["incomeStatementHistory"]["incomeStatementHistory"].is_array());
            }
            FetchOutcome::NoData => panic!("expected a payload"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FINANCIALS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.get_financials("ZZZZ", "US").await.unwrap(), FetchOutcome::NoData);
        assert_eq!(client.fetch_financials("ZZZZ", "US").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FINANCIALS_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_financials("AAPL", "US").await.unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 403, ref body } if body == "bad key"));

        let err = client.fetch_financials("AAPL", "US").await.unwrap_err();
        assert!(matches!(err, RatioError::Source(_)));
    }
}
