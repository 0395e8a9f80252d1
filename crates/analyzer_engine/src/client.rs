use std::error::Error as _;
use std::time::Duration;

use analyzer_logging::{analyzer_debug, analyzer_trace};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::{AnalyzeError, ClientBuildError, FailureKind};

/// Which backend endpoint shape to talk to. Both have been deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVariant {
    /// `GET {base}/analyze?url={target}`
    #[default]
    QueryGet,
    /// `POST {base}/api/analyze` with body `{"url": target}`
    JsonPost,
}

impl ApiVariant {
    pub fn path(self) -> &'static str {
        match self {
            ApiVariant::QueryGet => "/analyze",
            ApiVariant::JsonPost => "/api/analyze",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_variant: ApiVariant,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_variant: ApiVariant::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Remote analysis capability. Returns the raw JSON body of a 2xx answer.
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, target_url: &str) -> Result<Value, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientBuildError> {
        let endpoint = endpoint_url(&settings.base_url, settings.api_variant)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, target_url: &str) -> Result<reqwest::RequestBuilder, AnalyzeError> {
        let request = match self.settings.api_variant {
            ApiVariant::QueryGet => {
                let mut url = self.endpoint.clone();
                url.query_pairs_mut().append_pair("url", target_url);
                self.client.get(url)
            }
            ApiVariant::JsonPost => {
                let body = serde_json::to_vec(&serde_json::json!({ "url": target_url }))
                    .map_err(|err| AnalyzeError::new(FailureKind::Transport, err.to_string()))?;
                self.client
                    .post(self.endpoint.clone())
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
            }
        };
        Ok(request.header(ACCEPT, "application/json"))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, AnalyzeError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    format!("response of {content_len} bytes exceeds the {max_bytes} byte limit"),
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    format!("response exceeds the {max_bytes} byte limit"),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for ReqwestBackend {
    async fn analyze(&self, target_url: &str) -> Result<Value, AnalyzeError> {
        let request = self.build_request(target_url)?;
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        analyzer_debug!("backend answered {} for {}", status, target_url);
        let body = self.read_body(response).await?;
        analyzer_trace!("backend body is {} bytes", body.len());

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(Value::as_str)
                        .map(ToOwned::to_owned)
                });
            return Err(AnalyzeError::new(
                FailureKind::Remote {
                    status: status.as_u16(),
                    message,
                },
                status.to_string(),
            ));
        }

        serde_json::from_slice(&body)
            .map_err(|err| AnalyzeError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

fn endpoint_url(base_url: &str, variant: ApiVariant) -> Result<Url, ClientBuildError> {
    let invalid = |message: String| ClientBuildError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        message,
    };
    let base = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{base}{}", variant.path())).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    let description = describe(&err);
    if err.is_timeout() {
        return AnalyzeError::new(FailureKind::Timeout, description);
    }
    AnalyzeError::new(FailureKind::Transport, description)
}

/// `reqwest` keeps the interesting part (DNS, refused, TLS) in the source
/// chain, so flatten it into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_variant_path() {
        let url = endpoint_url("http://localhost:8080/", ApiVariant::QueryGet).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/analyze");

        let url = endpoint_url("https://api.example.com/v2", ApiVariant::JsonPost).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/api/analyze");
    }

    #[test]
    fn endpoint_rejects_bare_hosts_and_garbage() {
        assert!(matches!(
            endpoint_url("localhost:8080", ApiVariant::QueryGet),
            Err(ClientBuildError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            endpoint_url("not a url", ApiVariant::QueryGet),
            Err(ClientBuildError::InvalidBaseUrl { .. })
        ));
    }
}
