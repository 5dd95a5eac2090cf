//! services/encyclopedia/src/adapters/gemini.rs
//!
//! This module contains the adapter for the AI model that writes explanations
//! and suggests related hadiths. It implements the `ExplanationService` and
//! `RelatedHadithService` ports from the `core` crate.
//!
//! Gemini is reached through its OpenAI-compatible endpoint, so the client is a
//! plain `async_openai::Client` pointed at a different base URL.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use hadith_core::domain::RelatedHadithRef;
use hadith_core::ports::{ExplanationService, PortError, PortResult, RelatedHadithService};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

pub const EXPLANATION_FAILED: &str = "Failed to generate explanation from Gemini API.";

const TEMPERATURE: f32 = 0.5;
const TOP_P: f32 = 0.95;

const EXPLANATION_PROMPT: &str = "Anda adalah seorang ahli hadits yang ramah dan mudah dipahami. \
Jelaskan (syarah) hadits berikut ini secara mendalam namun dengan bahasa yang cocok untuk pemula. \
Berikan konteks, pelajaran yang bisa diambil, dan relevansinya dengan kehidupan modern.";

const RELATED_PROMPT: &str = "Anda adalah seorang peneliti hadits. Berdasarkan hadits ini, \
temukan 2-3 hadits lain dari kitab yang berbeda (jika memungkinkan) yang memiliki tema atau pesan serupa. \
Berikan respons HANYA dalam format JSON yang cocok dengan skema yang diberikan.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements both AI ports using a Gemini model.
#[derive(Clone)]
pub struct GeminiAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiAdapter {
    /// Creates a new `GeminiAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn base_request(&self, prompt: String) -> Result<CreateChatCompletionRequestArgs, OpenAIError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(messages)
            .temperature(TEMPERATURE)
            .top_p(TOP_P)
            .n(1);
        Ok(args)
    }

    fn explanation_request(&self, hadith_text: &str) -> Result<CreateChatCompletionRequest, OpenAIError> {
        self.base_request(format!("{}\n\nHadits:\n{}", EXPLANATION_PROMPT, hadith_text))?
            .build()
    }

    fn related_request(&self, hadith_text: &str) -> Result<CreateChatCompletionRequest, OpenAIError> {
        self.base_request(format!("{}\n\nHadits acuan:\n{}", RELATED_PROMPT, hadith_text))?
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: Some("Daftar hadits terkait.".to_string()),
                    name: "related_hadiths".to_string(),
                    schema: Some(related_schema()),
                    strict: Some(true),
                },
            })
            .build()
    }

    /// Sends the request and returns the text of the first choice.
    async fn complete(&self, request: CreateChatCompletionRequest) -> Result<String, OpenAIError> {
        let response = self.client.chat().create(request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OpenAIError::InvalidArgument("response contained no text content".to_string()))
    }
}

fn related_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "related_hadiths": {
                "type": "array",
                "description": "Daftar hadits terkait.",
                "items": {
                    "type": "object",
                    "properties": {
                        "bookName": {
                            "type": "string",
                            "description": "Nama kitab hadits, contoh: 'HR. Bukhari', 'HR. Tirmidzi'."
                        },
                        "hadithNumber": {
                            "type": "integer",
                            "description": "Nomor hadits dalam kitab tersebut."
                        }
                    },
                    "required": ["bookName", "hadithNumber"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["related_hadiths"],
        "additionalProperties": false
    })
}

//=========================================================================================
// Related Hadith Parsing
//=========================================================================================

#[derive(Deserialize)]
struct RelatedResponse {
    #[serde(default)]
    related_hadiths: Vec<RelatedRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedRecord {
    book_name: String,
    hadith_number: u32,
}

/// Parses the model's JSON answer. Anything that does not match the schema yields `[]`.
pub fn parse_related_hadiths(raw: &str) -> Vec<RelatedHadithRef> {
    match serde_json::from_str::<RelatedResponse>(raw.trim()) {
        Ok(parsed) => parsed
            .related_hadiths
            .into_iter()
            .map(|r| RelatedHadithRef {
                book_name: r.book_name,
                hadith_number: r.hadith_number,
            })
            .collect(),
        Err(e) => {
            warn!("Discarding malformed related-hadith response: {}", e);
            Vec::new()
        }
    }
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl ExplanationService for GeminiAdapter {
    async fn explain_hadith(&self, hadith_text: &str) -> PortResult<String> {
        let result = match self.explanation_request(hadith_text) {
            Ok(request) => self.complete(request).await,
            Err(e) => Err(e),
        };
        result.map_err(|e| {
            error!("Error getting hadith explanation: {}", e);
            PortError::Unexpected(EXPLANATION_FAILED.to_string())
        })
    }
}

#[async_trait]
impl RelatedHadithService for GeminiAdapter {
    async fn find_related_hadiths(&self, hadith_text: &str) -> Vec<RelatedHadithRef> {
        let result = match self.related_request(hadith_text) {
            Ok(request) => self.complete(request).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(raw) => parse_related_hadiths(&raw),
            Err(e) => {
                error!("Error finding related hadith: {}", e);
                Vec::new()
            }
        }
    }
}

/// Stands in for the AI when no API key is configured.
#[derive(Clone, Default)]
pub struct UnavailableAi;

#[async_trait]
impl ExplanationService for UnavailableAi {
    async fn explain_hadith(&self, _hadith_text: &str) -> PortResult<String> {
        warn!("GEMINI_API_KEY is not set; explanations are unavailable");
        Err(PortError::Unexpected(EXPLANATION_FAILED.to_string()))
    }
}

#[async_trait]
impl RelatedHadithService for UnavailableAi {
    async fn find_related_hadiths(&self, _hadith_text: &str) -> Vec<RelatedHadithRef> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::MockServer;

    fn adapter(server: &MockServer) -> GeminiAdapter {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base(server.base_url());
        GeminiAdapter::new(Client::with_config(config), "gemini-2.5-flash".to_string())
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000u32,
            "model": "gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content, "refusal": null },
                "finish_reason": "stop",
                "logprobs": null
            }]
        })
    }

    #[test]
    fn parses_well_formed_related_hadiths() {
        let raw = r#" {"related_hadiths":[{"bookName":"HR. Muslim","hadithNumber":45},{"bookName":"HR. Tirmidzi","hadithNumber":2516}]} "#;
        assert_eq!(
            parse_related_hadiths(raw),
            vec![
                RelatedHadithRef { book_name: "HR. Muslim".to_string(), hadith_number: 45 },
                RelatedHadithRef { book_name: "HR. Tirmidzi".to_string(), hadith_number: 2516 },
            ]
        );
    }

    #[test]
    fn missing_root_is_empty() {
        assert!(parse_related_hadiths("{}").is_empty());
    }

    #[test]
    fn schema_violations_are_empty() {
        assert!(parse_related_hadiths("not json").is_empty());
        assert!(parse_related_hadiths(r#"{"related_hadiths":[{"bookName":"HR. Muslim"}]}"#).is_empty());
        assert!(parse_related_hadiths(r#"{"related_hadiths":[{"bookName":"HR. Muslim","hadithNumber":"45"}]}"#).is_empty());
        assert!(parse_related_hadiths(r#"{"related_hadiths":[{"bookName":"HR. Muslim","hadithNumber":-1}]}"#).is_empty());
    }

    #[tokio::test]
    async fn explanation_returns_the_model_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .body_includes("Hadits:\\nAmal itu tergantung niat");
                then.status(200).json_body(completion("Penjelasan singkat."));
            })
            .await;

        let text = adapter(&server)
            .explain_hadith("Amal itu tergantung niat")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Penjelasan singkat.");
    }

    #[tokio::test]
    async fn explanation_failure_uses_the_fixed_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(400).json_body(json!({
                    "error": { "message": "API key not valid", "type": "invalid_request_error", "param": null, "code": null }
                }));
            })
            .await;

        let err = adapter(&server).explain_hadith("teks").await.unwrap_err();
        assert!(matches!(err, PortError::Unexpected(msg) if msg == EXPLANATION_FAILED));
    }

    #[tokio::test]
    async fn related_hadiths_request_a_json_schema() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .body_includes("\"json_schema\"");
                then.status(200).json_body(completion(
                    r#"{"related_hadiths":[{"bookName":"HR. Bukhari","hadithNumber":6018}]}"#,
                ));
            })
            .await;

        let related = adapter(&server).find_related_hadiths("teks").await;

        mock.assert_async().await;
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].hadith_number, 6018);
    }

    #[tokio::test]
    async fn related_hadiths_failure_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(400).body("bad request");
            })
            .await;

        assert!(adapter(&server).find_related_hadiths("teks").await.is_empty());
    }

    #[tokio::test]
    async fn unavailable_ai_degrades_quietly() {
        let ai = UnavailableAi;
        assert!(ai.explain_hadith("x").await.is_err());
        assert!(ai.find_related_hadiths("x").await.is_empty());
    }
}
