//! HTTP client for the art generation service

use crate::constants::*;
use crate::types::*;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, connection dropped or body not valid JSON
    #[error("could not reach the art service: {0}")]
    Transport(String),
    #[error("art service rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("art service returned an unreadable image: {0}")]
    InvalidImage(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Remote operations the generator depends on.
pub trait ArtService {
    async fn enhance_prompt(&self, prompt: &str) -> Result<String, ApiError>;
    async fn generate_image(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError>;
}

/// reqwest-backed client. Requests carry no timeout since generation can take minutes.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ArtService for HttpClient {
    async fn enhance_prompt(&self, prompt: &str) -> Result<String, ApiError> {
        let url = self.url(ENHANCE_PATH);
        debug!(url = %url, "Requesting prompt enhancement");
        let response = self
            .client
            .post(&url)
            .json(&EnhanceRequest { prompt })
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body: EnhanceResponse = response.json().await?;
        Ok(body.enhanced)
    }

    async fn generate_image(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        let url = self.url(GENERATE_PATH);
        debug!(
            url = %url,
            steps = request.steps,
            guidance = request.guidance_scale,
            width = request.width,
            height = request.height,
            seed = ?request.seed,
            "Requesting image generation"
        );
        let response = self.client.post(&url).json(request).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<GenerateResponse>().await?)
    }
}

/// Turn a non-2xx response into `ApiError::Rejected`, preferring the service's own message.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceError>(&text)
        .map(|e| e.error)
        .ok()
        .filter(|m| !m.is_empty())
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
    Err(ApiError::Rejected { status: status.as_u16(), message })
}

/// Ask the service to rewrite the prompt; any failure falls back to the original text.
pub async fn enhance_or_original<S: ArtService>(service: &S, prompt: &str) -> String {
    match service.enhance_prompt(prompt).await {
        Ok(enhanced) if !enhanced.trim().is_empty() => {
            debug!(original = %prompt, enhanced = %enhanced, "Prompt enhanced");
            enhanced
        }
        Ok(_) => {
            warn!("Enhancement returned an empty prompt, keeping original");
            prompt.to_string()
        }
        Err(e) => {
            warn!(error = %e, "Prompt enhancement failed, keeping original");
            prompt.to_string()
        }
    }
}

/// Blocking `GET /health` probe, run from a background thread.
pub fn probe_health(base_url: &str) -> Result<HealthStatus, ApiError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HEALTH_TIMEOUT)
        .build()?;
    let url = format!("{}{}", normalize_base_url(base_url), HEALTH_PATH);
    let response = client.get(&url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("unknown error").to_string(),
        });
    }
    Ok(response.json::<HealthStatus>()?)
}

pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Serve a single canned HTTP response on a loopback port.
    /// The received request body is sent back on the returned channel.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break buf.len();
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();
            tx.send(request_body).ok();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn generate_posts_payload_and_decodes_response() {
        let (url, rx) = serve_once(
            "200 OK",
            r#"{"image":"iVBORw0KGgo=","settings":{"steps":50,"guidance_scale":7.5,"dimensions":"512x512"}}"#,
        );
        let client = HttpClient::new(&url);
        let request = GenerateRequest::new("a red fox".into(), None, GenerationSettings::default());

        let response = client.generate_image(&request).await.unwrap();
        assert_eq!(response.image, "iVBORw0KGgo=");
        assert_eq!(response.settings.unwrap().dimensions.as_deref(), Some("512x512"));

        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert_eq!(sent["prompt"], "a red fox");
        assert_eq!(sent["guidance_scale"], 7.5);
        assert!(sent.get("seed").is_none());
    }

    #[tokio::test]
    async fn generate_non_success_status_is_rejected() {
        let (url, _rx) = serve_once("400 Bad Request", r#"{"error":"Prompt is required"}"#);
        let client = HttpClient::new(&url);
        let request = GenerateRequest::new("x".into(), None, GenerationSettings::default());

        match client.generate_image(&request).await {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Prompt is required");
            }
            other => panic!("expected rejection, got {:?}", other.map(|r| r.image)),
        }
    }

    #[tokio::test]
    async fn generate_unreachable_is_transport_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let client = HttpClient::new(&format!("http://{}", addr));
        let request = GenerateRequest::new("x".into(), None, GenerationSettings::default());

        let result = client.generate_image(&request).await;
        assert!(matches!(result, Err(ApiError::Transport(_))), "got {:?}", result.map(|r| r.image));
    }

    #[tokio::test]
    async fn generate_non_json_body_is_transport_error() {
        let (url, _rx) = serve_once("200 OK", "<html>gateway page</html>");
        let client = HttpClient::new(&url);
        let request = GenerateRequest::new("x".into(), None, GenerationSettings::default());

        let result = client.generate_image(&request).await;
        assert!(matches!(result, Err(ApiError::Transport(_))), "got {:?}", result.map(|r| r.image));
    }

    #[tokio::test]
    async fn enhance_failure_falls_back_to_original() {
        let (url, _rx) = serve_once("500 Internal Server Error", "");
        let client = HttpClient::new(&url);
        assert_eq!(enhance_or_original(&client, "a cat").await, "a cat");
    }

    #[tokio::test]
    async fn enhance_unreachable_falls_back_to_original() {
        // Bind then drop so nothing is listening on the port
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let client = HttpClient::new(&format!("http://{}", addr));
        assert_eq!(enhance_or_original(&client, "a dog").await, "a dog");
    }

    #[tokio::test]
    async fn enhance_returns_service_text() {
        let (url, rx) = serve_once("200 OK", r#"{"enhanced":"a cat, highly detailed"}"#);
        let client = HttpClient::new(&url);
        assert_eq!(enhance_or_original(&client, "a cat").await, "a cat, highly detailed");
        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert_eq!(sent["prompt"], "a cat");
    }

    #[test]
    fn health_probe_decodes_status() {
        let (url, _rx) = serve_once("200 OK", r#"{"status":"healthy","model":"sd-1.5","device":"cuda"}"#);
        let health = probe_health(&url).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.device, "cuda");
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(normalize_base_url("http://host:5000/"), "http://host:5000");
        assert_eq!(normalize_base_url("  "), DEFAULT_API_URL);
    }
}
