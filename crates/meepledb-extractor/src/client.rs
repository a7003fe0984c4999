//! HTTP client for the structured-extraction completion service.
//!
//! Sends the scraped markdown (truncated to a fixed character limit, to
//! respect the service's request-size caps) plus the ranked image-candidate
//! list, forces a single tool call against the schema in [`crate::schema`],
//! and coerces the arguments into a validated [`ExtractedGame`].

use std::borrow::Cow;
use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use meepledb_core::{Difficulty, ExtractedGame, GameType, PlayTime};

use crate::error::ExtractorError;
use crate::schema::{extraction_parameters, TOOL_DESCRIPTION, TOOL_NAME};
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, RawExtraction, Tool, ToolChoice, ToolChoiceFunction,
    ToolFunction,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Upper bound on the page content sent upstream, in characters, to respect
/// the service's request-size limits.
const MAX_PROMPT_CHARS: usize = 20_000;

const SYSTEM_PROMPT: &str = "You are a board game catalog assistant. Extract structured catalog \
fields for the single game described in the page content. Use only the enum values declared in \
the schema. Select main_image and gameplay_images verbatim from the supplied candidate list; \
never fabricate or modify an image URL, and leave the fields out if no candidate fits.";

/// Client for the completion service's chat endpoint.
///
/// Use [`ExtractionClient::new`] for production or
/// [`ExtractionClient::with_base_url`] to point at a mock server in tests.
pub struct ExtractionClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl ExtractionClient {
    /// Creates a new client pointed at the production completion service.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ExtractorError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ExtractorError::ExtractionFailed`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ExtractorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("meepledb/0.1 (catalog-import)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ExtractorError::ExtractionFailed {
            reason: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
        })
    }

    /// Extracts a structured record from scraped markdown.
    ///
    /// `image_candidates` is the ranked candidate list; the model is
    /// instructed to select image URLs verbatim from it.
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::UpstreamBusy`] on HTTP 429/503 (quota or
    ///   capacity), with `Retry-After` seconds when supplied.
    /// - [`ExtractorError::ExtractionFailed`] if the response lacks a
    ///   usable tool-call payload or the service returns any other
    ///   unexpected status.
    /// - [`ExtractorError::NoTitleFound`] if the payload has no non-empty
    ///   title.
    /// - [`ExtractorError::Http`] on network, TLS, or timeout failure.
    /// - [`ExtractorError::Deserialize`] if the response envelope is not
    ///   valid JSON.
    pub async fn extract(
        &self,
        markdown: &str,
        image_candidates: &[String],
    ) -> Result<ExtractedGame, ExtractorError> {
        let endpoint = self
            .base_url
            .join("v1/chat/completions")
            .map_err(|e| ExtractorError::ExtractionFailed {
                reason: format!("invalid endpoint URL: {e}"),
            })?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: Cow::Borrowed(SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: Cow::Owned(build_user_prompt(markdown, image_candidates)),
                },
            ],
            tools: vec![Tool {
                kind: "function",
                function: ToolFunction {
                    name: TOOL_NAME,
                    description: TOOL_DESCRIPTION,
                    parameters: extraction_parameters(),
                },
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction { name: TOOL_NAME },
            },
            temperature: 0.0,
        };

        tracing::debug!(
            model = %self.model,
            content_chars = markdown.chars().count().min(MAX_PROMPT_CHARS),
            candidate_count = image_candidates.len(),
            "requesting structured extraction"
        );

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ExtractorError::UpstreamBusy {
                status: status.as_u16(),
                retry_after_secs,
            });
        }
        if !status.is_success() {
            return Err(ExtractorError::ExtractionFailed {
                reason: format!("unexpected HTTP status {status} from completion service"),
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ExtractorError::Deserialize {
                context: "chat completion response".to_string(),
                source: e,
            })?;

        let call = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls.into_iter().next())
            .ok_or_else(|| ExtractorError::ExtractionFailed {
                reason: "response contained no tool call".to_string(),
            })?;

        if call.function.name != TOOL_NAME {
            return Err(ExtractorError::ExtractionFailed {
                reason: format!("response called unknown tool \"{}\"", call.function.name),
            });
        }

        let raw: RawExtraction = serde_json::from_str(&call.function.arguments).map_err(|e| {
            ExtractorError::ExtractionFailed {
                reason: format!("tool-call arguments did not match the schema: {e}"),
            }
        })?;

        coerce(raw)
    }
}

fn build_user_prompt(markdown: &str, image_candidates: &[String]) -> String {
    let content = truncate_chars(markdown, MAX_PROMPT_CHARS);

    let mut prompt = String::with_capacity(content.len() + 512);
    prompt.push_str("Page content:\n\n");
    prompt.push_str(content);
    prompt.push_str("\n\nImage candidates (best first):\n");
    if image_candidates.is_empty() {
        prompt.push_str("(none)\n");
    } else {
        for url in image_candidates {
            prompt.push_str("- ");
            prompt.push_str(url);
            prompt.push('\n');
        }
    }
    prompt
}

/// Truncates to at most `max_chars` characters, never splitting a code point.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Coerces the raw payload into a validated [`ExtractedGame`].
///
/// Enum fields outside their closed sets fall back to the documented
/// defaults; mechanic names are trimmed and deduplicated case-insensitively,
/// keeping the first spelling seen.
fn coerce(raw: RawExtraction) -> Result<ExtractedGame, ExtractorError> {
    let title = raw
        .title
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or(ExtractorError::NoTitleFound)?;

    let mut game = ExtractedGame {
        title,
        description: raw.description.filter(|d| !d.trim().is_empty()),
        difficulty: Difficulty::parse_or_default(raw.difficulty.as_deref()),
        play_time: PlayTime::parse_or_default(raw.play_time.as_deref()),
        game_type: GameType::parse_or_default(raw.game_type.as_deref()),
        min_players: raw.min_players,
        max_players: raw.max_players,
        suggested_age: raw.suggested_age.filter(|a| !a.trim().is_empty()),
        mechanics: dedupe_names(raw.mechanics),
        publisher: raw
            .publisher
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty()),
        main_image: raw.main_image.filter(|u| !u.trim().is_empty()),
        gameplay_images: raw.gameplay_images,
        bgg_url: raw.bgg_url.filter(|u| !u.trim().is_empty()),
    };
    game.normalize_players();
    Ok(game)
}

fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_lowercase()))
        .collect()
}
