// SPDX-License-Identifier: MPL-2.0
//! Remote style-transfer backend reached over HTTP.
//!
//! The request body is JSON with both images inlined as `data:` URIs:
//!
//! ```json
//! { "style_image": "data:image/png;base64,...",
//!   "content_image": "data:image/jpeg;base64,...",
//!   "aspect_ratio": "16:9" }
//! ```
//!
//! The service answers `{ "image": "<data URI or http(s) URL>" }`. URLs are
//! fetched with the same client.

use crate::application::port::{SynthesisError, SynthesisFuture, Synthesizer};
use crate::domain::generation::GenerationRequest;
use crate::domain::image::ImagePayload;
use crate::error::{Error, Result};
use crate::media::data_uri::{decode_data_uri, encode_data_uri};
use crate::media::image::decode_payload;
use serde::{Deserialize, Serialize};

/// Longest error body echoed back into a failure message.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct SynthesisRequestBody {
    style_image: String,
    content_image: String,
    aspect_ratio: &'static str,
}

#[derive(Debug, Deserialize)]
struct SynthesisResponseBody {
    image: String,
}

/// HTTP client for a remote synthesis service.
#[derive(Debug, Clone)]
pub struct HttpSynthesizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSynthesizer {
    /// Creates a synthesizer posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if !is_http_url(&endpoint) {
            return Err(Error::Config(format!(
                "synthesis endpoint must be an http(s) URL: {endpoint}"
            )));
        }

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("StyleClone/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Synthesizer for HttpSynthesizer {
    fn synthesize(&self, request: GenerationRequest) -> SynthesisFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move { post_request(&client, &endpoint, &request).await })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

async fn post_request(
    client: &reqwest::Client,
    endpoint: &str,
    request: &GenerationRequest,
) -> std::result::Result<ImagePayload, SynthesisError> {
    let body = SynthesisRequestBody {
        style_image: encode_data_uri(request.style_image()),
        content_image: encode_data_uri(request.content_image()),
        aspect_ratio: request.ratio().label(),
    };

    let response = client
        .post(endpoint)
        .json(&body)
        .send()
        .await
        .map_err(|e| SynthesisError::Unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), &text));
    }

    let reply: SynthesisResponseBody = response
        .json()
        .await
        .map_err(|e| SynthesisError::InvalidOutput(e.to_string()))?;

    let bytes = resolve_image(client, &reply.image).await?;
    decode_payload(&bytes).map_err(|e| SynthesisError::InvalidOutput(e.to_string()))
}

/// Turns the `image` field of a reply into raw image bytes.
async fn resolve_image(
    client: &reqwest::Client,
    image: &str,
) -> std::result::Result<Vec<u8>, SynthesisError> {
    if let Some((_, bytes)) = decode_data_uri(image) {
        return Ok(bytes);
    }

    if !is_http_url(image) {
        return Err(SynthesisError::InvalidOutput(
            "reply image is neither a data URI nor a URL".to_string(),
        ));
    }

    let response = client
        .get(image.trim())
        .send()
        .await
        .map_err(|e| SynthesisError::Unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SynthesisError::Status {
            code: status.as_u16(),
            message: format!("fetching result image: {status}"),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SynthesisError::Unreachable(e.to_string()))?;
    Ok(bytes.to_vec())
}

fn status_error(code: u16, body: &str) -> SynthesisError {
    let message: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    match code {
        400 | 413 | 415 | 422 => SynthesisError::Rejected(message),
        _ => SynthesisError::Status { code, message },
    }
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::{AspectRatio, RequestId};
    use crate::domain::image::Fingerprint;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;

    struct Reply {
        status: u16,
        content_type: &'static str,
        body: Vec<u8>,
    }

    impl Reply {
        fn json(status: u16, body: String) -> Self {
            Self {
                status,
                content_type: "application/json",
                body: body.into_bytes(),
            }
        }

        fn text(status: u16, body: &str) -> Self {
            Self {
                status,
                content_type: "text/plain",
                body: body.as_bytes().to_vec(),
            }
        }

        fn png(body: Vec<u8>) -> Self {
            Self {
                status: 200,
                content_type: "image/png",
                body,
            }
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([90, 30, 160, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    fn sample_request() -> GenerationRequest {
        let style = decode_payload(&png_bytes(4, 4)).expect("style decodes");
        let content = decode_payload(&png_bytes(8, 6)).expect("content decodes");
        GenerationRequest::new(RequestId::new(1), style, content, AspectRatio::Widescreen16x9)
    }

    async fn bind() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("listener address");
        (listener, format!("http://{addr}"))
    }

    /// Answers one connection per reply, in order, and reports each raw
    /// request it read.
    fn serve(listener: TcpListener, replies: Vec<Reply>) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);

                let reason = if reply.status < 400 { "OK" } else { "Error" };
                let head = format!(
                    "HTTP/1.1 {} {reason}\r\ncontent-type: {}\r\ncontent-length: {}\r\n\
                     connection: close\r\n\r\n",
                    reply.status,
                    reply.content_type,
                    reply.body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&reply.body).await;
                let _ = socket.shutdown().await;
            }
        });
        rx
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = socket.read(&mut buf).await.unwrap_or(0);
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buf[..read]);

            let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&data[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                break;
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    #[test]
    fn new_rejects_non_http_endpoints() {
        assert!(matches!(
            HttpSynthesizer::new("ftp://example.com"),
            Err(Error::Config(_))
        ));
        assert!(HttpSynthesizer::new("").is_err());
    }

    #[test]
    fn new_accepts_https_endpoint() {
        let synthesizer =
            HttpSynthesizer::new("https://example.com/v1/style").expect("valid endpoint");
        assert_eq!(synthesizer.endpoint(), "https://example.com/v1/style");
        assert_eq!(synthesizer.name(), "http");
    }

    #[test]
    fn request_body_inlines_images() {
        let style =
            ImagePayload::new(b"s".to_vec(), "image/png", 1, 1, Fingerprint::from_bytes([1; 32]));
        let content =
            ImagePayload::new(b"c".to_vec(), "image/jpeg", 1, 1, Fingerprint::from_bytes([2; 32]));
        let request =
            GenerationRequest::new(RequestId::new(3), style, content, AspectRatio::Widescreen16x9);

        let body = SynthesisRequestBody {
            style_image: encode_data_uri(request.style_image()),
            content_image: encode_data_uri(request.content_image()),
            aspect_ratio: request.ratio().label(),
        };
        let json = serde_json::to_value(&body).expect("body serializes");

        assert_eq!(json["style_image"], "data:image/png;base64,cw==");
        assert_eq!(json["content_image"], "data:image/jpeg;base64,Yw==");
        assert_eq!(json["aspect_ratio"], "16:9");
    }

    #[test]
    fn response_body_parses_image_field() {
        let reply: SynthesisResponseBody =
            serde_json::from_str(r#"{"image":"https://cdn.example.com/out.png","seed":4}"#)
                .expect("reply parses");
        assert_eq!(reply.image, "https://cdn.example.com/out.png");
    }

    #[test]
    fn status_errors_are_classified() {
        assert!(matches!(status_error(422, "bad input"), SynthesisError::Rejected(_)));
        assert!(status_error(503, "busy").is_transient());

        let long_body = "x".repeat(1000);
        match status_error(500, &long_body) {
            SynthesisError::Status { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message.len(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_image_decodes_data_uri_without_network() {
        let client = reqwest::Client::new();
        let bytes = resolve_image(&client, "data:image/png;base64,YWJj")
            .await
            .expect("data uri resolves");
        assert_eq!(bytes, b"abc");
    }

    #[tokio::test]
    async fn resolve_image_rejects_unknown_schemes() {
        let client = reqwest::Client::new();
        let err = resolve_image(&client, "file:///etc/passwd")
            .await
            .expect_err("non-http references are refused");
        assert!(matches!(err, SynthesisError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn synthesize_posts_request_and_decodes_inline_reply() {
        let (listener, base) = bind().await;
        let reply = format!(
            r#"{{"image":"data:image/png;base64,{}"}}"#,
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, png_bytes(3, 2))
        );
        let mut requests = serve(listener, vec![Reply::json(200, reply)]);

        let synthesizer = HttpSynthesizer::new(format!("{base}/generate")).expect("endpoint");
        let payload = synthesizer
            .synthesize(sample_request())
            .await
            .expect("inline image decodes");

        assert_eq!(payload.dimensions(), (3, 2));
        assert_eq!(payload.mime_type(), "image/png");

        let request = requests.recv().await.expect("request seen");
        assert!(request.starts_with("POST /generate"));
        assert!(request.contains(r#""aspect_ratio":"16:9""#));
        assert!(request.contains(r#""style_image":"data:image/png;base64,"#));
    }

    #[tokio::test]
    async fn synthesize_fetches_result_url() {
        let (listener, base) = bind().await;
        let reply = format!(r#"{{"image":"{base}/results/out.png"}}"#);
        let mut requests = serve(
            listener,
            vec![Reply::json(200, reply), Reply::png(png_bytes(5, 4))],
        );

        let synthesizer = HttpSynthesizer::new(format!("{base}/generate")).expect("endpoint");
        let payload = synthesizer
            .synthesize(sample_request())
            .await
            .expect("fetched image decodes");
        assert_eq!(payload.dimensions(), (5, 4));

        let post = requests.recv().await.expect("post seen");
        assert!(post.starts_with("POST /generate"));
        let fetch = requests.recv().await.expect("fetch seen");
        assert!(fetch.starts_with("GET /results/out.png"));
    }

    #[tokio::test]
    async fn synthesize_reports_server_errors_as_status() {
        let (listener, base) = bind().await;
        let _requests = serve(listener, vec![Reply::text(500, "boom")]);

        let synthesizer = HttpSynthesizer::new(format!("{base}/generate")).expect("endpoint");
        let err = synthesizer
            .synthesize(sample_request())
            .await
            .expect_err("500 fails");

        assert_eq!(
            err,
            SynthesisError::Status {
                code: 500,
                message: "boom".to_string()
            }
        );
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn synthesize_rejects_undecodable_output() {
        let (listener, base) = bind().await;
        // "not an image"
        let reply = r#"{"image":"data:image/png;base64,bm90IGFuIGltYWdl"}"#.to_string();
        let _requests = serve(listener, vec![Reply::json(200, reply)]);

        let synthesizer = HttpSynthesizer::new(format!("{base}/generate")).expect("endpoint");
        let err = synthesizer
            .synthesize(sample_request())
            .await
            .expect_err("junk bytes fail");
        assert!(matches!(err, SynthesisError::InvalidOutput(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn synthesize_rejects_non_json_reply() {
        let (listener, base) = bind().await;
        let _requests = serve(listener, vec![Reply::text(200, "<html>hello</html>")]);

        let synthesizer = HttpSynthesizer::new(format!("{base}/generate")).expect("endpoint");
        let err = synthesizer
            .synthesize(sample_request())
            .await
            .expect_err("html reply fails");
        assert!(matches!(err, SynthesisError::InvalidOutput(_)), "got {err:?}");
    }
}
