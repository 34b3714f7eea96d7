use crate::prelude::*;
use reqwest::StatusCode;
use serde_json::Value;

pub mod fetcher;

pub use fetcher::Fetcher;

// Re-export domain types from core
pub use tumblr2ghost_core::tumblr::{BlogInfo, SourcePost};

const TUMBLR_API_BASE: &str = "https://api.tumblr.com/v2";

/// Which blog to read and how to reach the API
#[derive(Debug, clap::Args, Clone)]
pub struct TumblrConfig {
    /// Blog identifier (e.g., "staff.tumblr.com")
    #[arg(short, long, env = "TUMBLR_BLOG")]
    pub blog: String,

    /// Tumblr API consumer key
    #[arg(short = 'k', long, env = "TUMBLR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the Tumblr v2 API
    #[arg(long, env = "TUMBLR_API_BASE", default_value = TUMBLR_API_BASE)]
    pub api_base: String,
}

/// Issues GET requests and returns their JSON bodies
pub trait Transport {
    async fn get_json(&self, url: &str) -> Result<Value, Error>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, Error> {
        // reqwest errors embed the request URL, which carries the API key.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(f!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(f!("Failed to read response body: {}", e.without_url())))?;

        decode_response(status, &text)
    }
}

/// Statuses the API uses for a missing blog or a rejected key
///
/// Their JSON body is handed to the envelope validators so that it surfaces
/// as an invalid blog rather than a network failure.
fn is_blog_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
    )
}

/// Turn a status and body into JSON, or a network error for failed requests
fn decode_response(status: StatusCode, text: &str) -> Result<Value, Error> {
    if !status.is_success() && !is_blog_rejection(status) {
        return Err(Error::Network(f!("HTTP {}", status)));
    }

    serde_json::from_str::<Value>(text).map_err(|e| {
        if status.is_success() {
            Error::Network(f!("Failed to parse JSON response: {}", e))
        } else {
            Error::Network(f!("HTTP {}", status))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tumblr::testing::{test_config, API_KEY, BLOG};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve every connection with the same canned HTTP response
    async fn serve(
        status_line: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}/v2")
    }

    fn local_transport() -> HttpTransport {
        HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    fn info_endpoint(api_base: &str) -> String {
        tumblr2ghost_core::tumblr::info_url(api_base, BLOG, API_KEY)
    }

    #[test]
    fn test_decode_response_success() {
        let value = decode_response(StatusCode::OK, r#"{"response":{"posts":[]}}"#).unwrap();
        assert_eq!(value["response"]["posts"], serde_json::json!([]));
    }

    #[test]
    fn test_decode_response_server_error_with_json_body() {
        let result = decode_response(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"meta":{"status":503},"response":[]}"#,
        );
        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("503")));
    }

    #[test]
    fn test_decode_response_rate_limited() {
        let result = decode_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"meta":{"status":429},"response":[]}"#,
        );
        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("429")));
    }

    #[test]
    fn test_decode_response_not_found_passes_json_through() {
        let value = decode_response(
            StatusCode::NOT_FOUND,
            r#"{"meta":{"status":404},"response":[]}"#,
        )
        .unwrap();
        assert_eq!(value["meta"]["status"], 404);
    }

    #[test]
    fn test_decode_response_non_json_error_body() {
        let result = decode_response(StatusCode::NOT_FOUND, "<html>Not Found</html>");
        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("404")));

        let result = decode_response(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("502")));
    }

    #[test]
    fn test_decode_response_invalid_json_on_success() {
        let result = decode_response(StatusCode::OK, "not json");
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn test_http_transport_service_unavailable_is_network_error() {
        let api_base = serve(
            "503 Service Unavailable",
            "application/json",
            r#"{"meta":{"status":503},"response":[]}"#,
        )
        .await;
        let config = TumblrConfig {
            api_base,
            ..test_config()
        };
        let fetcher = Fetcher::new(local_transport(), config);

        let result = fetcher.get_blog_info().await;
        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_http_transport_non_json_error_body() {
        let api_base = serve("500 Internal Server Error", "text/html", "<h1>oops</h1>").await;

        let result = local_transport().get_json(&info_endpoint(&api_base)).await;
        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_http_transport_not_found_is_invalid_blog() {
        let api_base = serve(
            "404 Not Found",
            "application/json",
            r#"{"meta":{"status":404,"msg":"Not Found"},"response":[]}"#,
        )
        .await;
        let config = TumblrConfig {
            api_base,
            ..test_config()
        };
        let fetcher = Fetcher::new(local_transport(), config);

        let result = fetcher.get_blog_info().await;
        assert!(matches!(
            result,
            Err(Error::Core(tumblr2ghost_core::Error::InvalidBlog(_)))
        ));
    }

    #[tokio::test]
    async fn test_http_transport_success() {
        let api_base = serve(
            "200 OK",
            "application/json",
            r#"{"meta":{"status":200},"response":{"blog":{"posts":7}}}"#,
        )
        .await;

        let value = local_transport()
            .get_json(&info_endpoint(&api_base))
            .await
            .unwrap();
        assert_eq!(value["response"]["blog"]["posts"], 7);
    }
}
