//! Server link providers.
//!
//! - [`StaticServerConfigProvider`]: links written in `config.toml`
//! - [`HttpServerConfigProvider`]: links fetched from a remote deep-link
//!   configuration document

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use linkbook_core::config::ServerSettings;
use linkbook_core::profile_link::{ServerConfigError, ServerConfigProvider, ServerLinks};

/// Serves a fixed set of links.
#[derive(Debug, Clone)]
pub struct StaticServerConfigProvider {
    links: ServerLinks,
}

impl StaticServerConfigProvider {
    pub fn new(links: ServerLinks) -> Self {
        Self { links }
    }
}

#[async_trait]
impl ServerConfigProvider for StaticServerConfigProvider {
    async fn server_links(&self) -> Result<ServerLinks, ServerConfigError> {
        Ok(self.links.clone())
    }
}

/// Remote deep-link configuration document.
///
/// ```json
/// {
///   "title": "Example",
///   "endpoints": {
///     "backendURL": "https://nginz-https.example.org",
///     "backendWSURL": "https://nginz-ssl.example.org",
///     "teamsURL": "https://teams.example.org",
///     "accountsURL": "https://account.example.org",
///     "websiteURL": "https://example.org"
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct DeepLinkConfig {
    title: String,
    endpoints: DeepLinkEndpoints,
}

#[derive(Debug, Deserialize)]
struct DeepLinkEndpoints {
    #[serde(rename = "backendURL")]
    backend: String,
    #[serde(rename = "backendWSURL")]
    backend_ws: String,
    #[serde(rename = "teamsURL")]
    teams: String,
    #[serde(rename = "accountsURL")]
    accounts: String,
    #[serde(rename = "websiteURL")]
    website: String,
}

impl From<DeepLinkConfig> for ServerLinks {
    fn from(config: DeepLinkConfig) -> Self {
        ServerLinks {
            api: config.endpoints.backend,
            accounts: config.endpoints.accounts,
            web_socket: config.endpoints.backend_ws,
            teams: config.endpoints.teams,
            website: config.endpoints.website,
            title: config.title,
            is_on_premises: true,
        }
    }
}

/// Parses a deep-link configuration document.
pub fn parse_deep_link_config(body: &str) -> Result<ServerLinks, ServerConfigError> {
    serde_json::from_str::<DeepLinkConfig>(body)
        .map(ServerLinks::from)
        .map_err(|e| ServerConfigError::InvalidPayload(e.to_string()))
}

/// Fetches links from a deep-link configuration URL.
#[derive(Debug, Clone)]
pub struct HttpServerConfigProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpServerConfigProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ServerConfigProvider for HttpServerConfigProvider {
    async fn server_links(&self) -> Result<ServerLinks, ServerConfigError> {
        tracing::debug!(url = %self.url, "Fetching server configuration");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ServerConfigError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServerConfigError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServerConfigError::Unavailable(e.to_string()))?;

        parse_deep_link_config(&body)
    }
}

/// Picks the provider described by the server settings.
///
/// A configured `config_url` wins over the static links.
pub fn provider_from_settings(settings: &ServerSettings) -> Arc<dyn ServerConfigProvider> {
    match settings.config_url.as_deref() {
        Some(url) if !url.trim().is_empty() => Arc::new(HttpServerConfigProvider::new(url)),
        _ => Arc::new(StaticServerConfigProvider::new(settings.links())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single HTTP request with `status` and `body`, returning the URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/deeplink.json", addr)
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    const DEEP_LINK: &str = r#"{
        "title": "Example",
        "endpoints": {
            "backendURL": "https://nginz-https.example.org",
            "backendWSURL": "https://nginz-ssl.example.org",
            "blackListURL": "https://clientblacklist.example.org",
            "teamsURL": "https://teams.example.org",
            "accountsURL": "https://account.example.org",
            "websiteURL": "https://example.org"
        }
    }"#;

    #[tokio::test]
    async fn test_static_provider_returns_links() {
        let settings = ServerSettings::default();
        let provider = StaticServerConfigProvider::new(settings.links());

        let links = provider.server_links().await.unwrap();
        assert_eq!(links.accounts, "https://account.wire.com");
        assert!(!links.is_on_premises);
    }

    #[test]
    fn test_parse_deep_link_config() {
        let links = parse_deep_link_config(DEEP_LINK).unwrap();
        assert_eq!(links.accounts, "https://account.example.org");
        assert_eq!(links.api, "https://nginz-https.example.org");
        assert_eq!(links.web_socket, "https://nginz-ssl.example.org");
        assert_eq!(links.title, "Example");
        assert!(links.is_on_premises);
    }

    #[test]
    fn test_parse_missing_accounts_is_invalid_payload() {
        let body = r#"{"title": "x", "endpoints": {"backendURL": "a"}}"#;
        assert!(matches!(
            parse_deep_link_config(body),
            Err(ServerConfigError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_settings_without_url_use_static_links() {
        let mut settings = ServerSettings::default();
        settings.accounts_url = "https://accounts.local".to_string();

        let provider = provider_from_settings(&settings);
        let links = provider.server_links().await.unwrap();
        assert_eq!(links.accounts, "https://accounts.local");
    }

    #[tokio::test]
    async fn test_http_provider_fetches_deep_link_config() {
        let url = serve_once("200 OK", DEEP_LINK).await;
        let provider = HttpServerConfigProvider::with_client(local_client(), url);

        let links = provider.server_links().await.unwrap();
        assert_eq!(links.accounts, "https://account.example.org");
        assert_eq!(links.teams, "https://teams.example.org");
        assert!(links.is_on_premises);
    }

    #[tokio::test]
    async fn test_http_error_status_is_reported() {
        let url = serve_once("503 Service Unavailable", "{}").await;
        let provider = HttpServerConfigProvider::with_client(local_client(), url);

        assert_eq!(
            provider.server_links().await,
            Err(ServerConfigError::Http { status: 503 })
        );
    }

    #[tokio::test]
    async fn test_http_malformed_body_is_invalid_payload() {
        let url = serve_once("200 OK", "<html>maintenance</html>").await;
        let provider = HttpServerConfigProvider::with_client(local_client(), url);

        assert!(matches!(
            provider.server_links().await,
            Err(ServerConfigError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_settings_with_url_fetch_over_http() {
        let mut settings = ServerSettings::default();
        settings.config_url = Some(serve_once("200 OK", DEEP_LINK).await);

        let provider = provider_from_settings(&settings);
        let links = provider.server_links().await.unwrap();
        assert_eq!(links.title, "Example");
        assert_eq!(links.accounts, "https://account.example.org");
    }

    #[tokio::test]
    async fn test_blank_url_uses_static_links() {
        let mut settings = ServerSettings::default();
        settings.config_url = Some("  ".to_string());

        let links = provider_from_settings(&settings).server_links().await.unwrap();
        assert_eq!(links, settings.links());
    }

    #[tokio::test]
    async fn test_unreachable_url_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = HttpServerConfigProvider::with_client(
            local_client(),
            format!("http://{}/deeplink.json", addr),
        );
        assert!(matches!(
            provider.server_links().await,
            Err(ServerConfigError::Unavailable(_))
        ));
    }
}
