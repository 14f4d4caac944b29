//! Minimal client for the Gemini `generateContent` endpoint with Google Maps grounding.
//!
//! Only the parts of the wire format the site reads are modelled; everything
//! else in a response is ignored on decode.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    /// A single user turn, with maps grounding centred on the given point.
    pub fn maps_grounded(prompt: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            tools: vec![Tool {
                google_maps: Some(GoogleMaps {}),
            }],
            tool_config: Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude,
                        longitude,
                    },
                },
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<GoogleMaps>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleMaps {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<SourceRef>,
    #[serde(default)]
    pub maps: Option<SourceRef>,
}

impl GroundingChunk {
    pub fn uri(&self) -> Option<&str> {
        self.web
            .as_ref()
            .and_then(|s| s.uri.as_deref())
            .or_else(|| self.maps.as_ref().and_then(|s| s.uri.as_deref()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, `None` when there are none.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// Citation URIs of the first candidate, in the order the service sent them.
    pub fn citation_uris(&self) -> impl Iterator<Item = &str> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .into_iter()
            .flat_map(|m| m.grounding_chunks.iter())
            .filter_map(GroundingChunk::uri)
    }
}

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("fail to build http client")?;
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!("calling gemini at {url}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .with_context(|| format!("fail to reach {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("gemini api error ({status}): {body}");
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .context("fail to decode gemini response")
    }
}
