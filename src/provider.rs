//! The content provider: one best-effort grounding call merged over the
//! static fallback record. It never fails its caller.

use crate::{
    config::ProviderSettings,
    data::RestaurantData,
    fallback::FALLBACK_DATA,
    gemini::{GeminiClient, GenerateContentRequest, GenerateContentResponse},
};
use tracing::{error, info, warn};

/// Where the generated content comes from. [`GeminiClient`] in production.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse>;
}

#[async_trait::async_trait]
impl ContentSource for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        self.generate_content(model, request).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackReason {
    #[error("no api key configured")]
    MissingCredential,
    #[error("remote call failed: {0}")]
    RemoteFailure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Remote(RestaurantData),
    Fallback(RestaurantData, FallbackReason),
}

impl Outcome {
    fn fallback(reason: FallbackReason) -> Self {
        Self::Fallback(FALLBACK_DATA.clone(), reason)
    }

    pub fn data(&self) -> &RestaurantData {
        match self {
            Self::Remote(data) | Self::Fallback(data, _) => data,
        }
    }

    pub fn into_data(self) -> RestaurantData {
        match self {
            Self::Remote(data) | Self::Fallback(data, _) => data,
        }
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Remote(_) => None,
            Self::Fallback(_, reason) => Some(reason),
        }
    }
}

/// Heuristic only: any google-hosted URI passes, not just maps pages.
fn is_maps_uri(uri: &str) -> bool {
    uri.contains("maps") || uri.contains("google")
}

/// Fallback record with the description and maps link taken from `response`
/// where it has them. Nothing else is read from the response.
pub fn merge_response(response: &GenerateContentResponse) -> RestaurantData {
    let mut data = FALLBACK_DATA.clone();

    if let Some(text) = response.text().filter(|t| !t.is_empty()) {
        data.description = text;
    }
    if let Some(uri) = response.citation_uris().find(|uri| is_maps_uri(uri)) {
        data.google_maps_uri = Some(uri.to_string());
    }

    data
}

pub struct ContentProvider {
    settings: ProviderSettings,
}

impl ContentProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    pub async fn fetch(&self) -> Outcome {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            warn!("no api key found, using fallback data");
            return Outcome::fallback(FallbackReason::MissingCredential);
        };

        match GeminiClient::new(api_key, &self.settings.base_url) {
            Ok(client) => self.fetch_from(&client).await,
            Err(e) => {
                error!("fail to create gemini client: {e:#}");
                Outcome::fallback(FallbackReason::RemoteFailure(format!("{e:#}")))
            }
        }
    }

    /// Issue the one grounding request against `source` and merge the answer.
    pub async fn fetch_from<S: ContentSource + ?Sized>(&self, source: &S) -> Outcome {
        let request = GenerateContentRequest::maps_grounded(
            &self.settings.prompt,
            self.settings.latitude,
            self.settings.longitude,
        );

        match source.generate(&self.settings.model, &request).await {
            Ok(response) => {
                let data = merge_response(&response);
                info!(
                    "restaurant details enriched, maps link: {}",
                    data.google_maps_uri.as_deref().unwrap_or("-")
                );
                Outcome::Remote(data)
            }
            Err(e) => {
                error!("gemini api error: {e:#}");
                Outcome::fallback(FallbackReason::RemoteFailure(format!("{e:#}")))
            }
        }
    }
}

/// Restaurant details for the page. Always resolves.
pub async fn fetch_restaurant_data(settings: ProviderSettings) -> RestaurantData {
    ContentProvider::new(settings).fetch().await.into_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderSettingsBuilder;
    use crate::gemini::{Candidate, Content, GroundingChunk, GroundingMetadata, Part, SourceRef};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct Canned {
        reply: Mutex<Option<anyhow::Result<GenerateContentResponse>>>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn ok(response: GenerateContentResponse) -> Self {
            Self {
                reply: Mutex::new(Some(Ok(response))),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(message: &'static str) -> Self {
            Self {
                reply: Mutex::new(Some(Err(anyhow::anyhow!(message)))),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ContentSource for Canned {
        async fn generate(
            &self,
            model: &str,
            request: &GenerateContentRequest,
        ) -> anyhow::Result<GenerateContentResponse> {
            assert_eq!(model, "gemini-2.5-flash");
            assert_eq!(request.tools.len(), 1);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.lock().unwrap().take().expect("called more than once")
        }
    }

    fn response(text: Option<&str>, uris: Option<&[&str]>) -> GenerateContentResponse {
        let grounding_metadata = uris.map(|uris| GroundingMetadata {
            grounding_chunks: uris
                .iter()
                .map(|uri| GroundingChunk {
                    web: Some(SourceRef {
                        uri: Some(uri.to_string()),
                        title: None,
                    }),
                    maps: None,
                })
                .collect(),
        });
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: text
                        .map(|t| Part {
                            text: Some(t.to_string()),
                        })
                        .into_iter()
                        .collect(),
                }),
                grounding_metadata,
            }],
        }
    }

    fn provider_with_key() -> ContentProvider {
        ContentProvider::new(
            ProviderSettingsBuilder::default()
                .api_key("test-key")
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_no_credential_returns_fallback() {
        let outcome = ContentProvider::new(ProviderSettings::default()).fetch().await;
        assert_eq!(outcome.reason(), Some(&FallbackReason::MissingCredential));
        assert_eq!(outcome.data(), &*FALLBACK_DATA);
        assert_eq!(outcome.into_data(), *FALLBACK_DATA);

        let data = fetch_restaurant_data(ProviderSettings::default()).await;
        assert_eq!(data, *FALLBACK_DATA);
    }

    #[tokio::test]
    async fn test_remote_error_returns_fallback() {
        let source = Canned::err("connection reset");
        let outcome = provider_with_key().fetch_from(&source).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            outcome.reason(),
            Some(FallbackReason::RemoteFailure(msg)) if msg.contains("connection reset")
        ));
        assert_eq!(outcome.into_data(), *FALLBACK_DATA);
    }

    #[tokio::test]
    async fn test_selective_override() {
        let source = Canned::ok(response(Some("X"), Some(&["https://maps.example/place"])));
        let outcome = provider_with_key().fetch_from(&source).await;
        assert!(outcome.reason().is_none());

        let data = outcome.into_data();
        let fallback = &*FALLBACK_DATA;
        assert_eq!(data.description, "X");
        assert_eq!(data.google_maps_uri.as_deref(), Some("https://maps.example/place"));
        assert_eq!(data.name, fallback.name);
        assert_eq!(data.address, fallback.address);
        assert_eq!(data.rating, fallback.rating);
        assert_eq!(data.review_count, fallback.review_count);
        assert_eq!(data.reviews, fallback.reviews);
    }

    #[tokio::test]
    async fn test_citation_without_match_keeps_fallback_uri() {
        let source = Canned::ok(response(Some("X"), None));
        let data = provider_with_key().fetch_from(&source).await.into_data();
        assert_eq!(data.google_maps_uri, FALLBACK_DATA.google_maps_uri);

        let source = Canned::ok(response(
            Some("X"),
            Some(&["https://example.com/a", "https://tripadvisor.example/b"]),
        ));
        let data = provider_with_key().fetch_from(&source).await.into_data();
        assert_eq!(data.google_maps_uri, FALLBACK_DATA.google_maps_uri);
    }

    #[tokio::test]
    async fn test_first_matching_citation_wins() {
        let source = Canned::ok(response(
            None,
            Some(&[
                "https://example.com/a",
                "https://www.google.com/search?q=manti",
                "https://maps.example/later",
            ]),
        ));
        let data = provider_with_key().fetch_from(&source).await.into_data();
        assert_eq!(
            data.google_maps_uri.as_deref(),
            Some("https://www.google.com/search?q=manti")
        );
    }

    #[tokio::test]
    async fn test_empty_text_keeps_fallback_description() {
        for text in [None, Some("")] {
            let source = Canned::ok(response(text, None));
            let data = provider_with_key().fetch_from(&source).await.into_data();
            assert_eq!(data.description, FALLBACK_DATA.description);
            assert_eq!(data, *FALLBACK_DATA);
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_fallback() {
        let settings = ProviderSettingsBuilder::default()
            .api_key("test-key")
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();
        let outcome = ContentProvider::new(settings).fetch().await;
        assert!(matches!(
            outcome.reason(),
            Some(FallbackReason::RemoteFailure(_))
        ));
        let data = outcome.into_data();
        assert_eq!(data, *FALLBACK_DATA);
        assert!(!data.name.is_empty());
    }

    /// Answer exactly one HTTP request with `status` and `body`, returning the base url.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&request);
                let Some(header_end) = text.find("\r\n\r\n") else { continue };
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    fn provider_for(base_url: &str) -> ContentProvider {
        ContentProvider::new(
            ProviderSettingsBuilder::default()
                .api_key("test-key")
                .base_url(base_url)
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_http_error_status_returns_fallback() {
        let base_url = serve_once("403 Forbidden", r#"{"error":{"code":403}}"#).await;
        let outcome = provider_for(&base_url).fetch().await;
        assert!(matches!(
            outcome.reason(),
            Some(FallbackReason::RemoteFailure(msg)) if msg.contains("403")
        ));
        assert_eq!(outcome.into_data(), *FALLBACK_DATA);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_fallback() {
        let base_url = serve_once("200 OK", "not json").await;
        let outcome = provider_for(&base_url).fetch().await;
        assert!(matches!(
            outcome.reason(),
            Some(FallbackReason::RemoteFailure(msg)) if msg.contains("decode")
        ));
        assert_eq!(outcome.into_data(), *FALLBACK_DATA);
    }

    #[tokio::test]
    async fn test_grounded_answer_over_http() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Busy at lunch."}]},"groundingMetadata":{"groundingChunks":[{"maps":{"uri":"https://maps.google.com/?cid=42"}}]}}]}"#;
        let base_url = serve_once("200 OK", body).await;
        let outcome = provider_for(&base_url).fetch().await;
        assert!(outcome.reason().is_none());

        let data = outcome.into_data();
        assert_eq!(data.description, "Busy at lunch.");
        assert_eq!(data.google_maps_uri.as_deref(), Some("https://maps.google.com/?cid=42"));
        assert_eq!(data.reviews, FALLBACK_DATA.reviews);
    }
}
