//! Gemini Reasoner - `NegotiationReasoner` backed by Google's Gemini API.
//!
//! The prompt carries the listing's pricing inputs, market signals and the
//! conversation so far. The model is asked for JSON output; replies are
//! still sanitized because fenced or array-wrapped JSON shows up in practice.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash-001")
//!     .with_timeout(Duration::from_secs(20));
//!
//! let reasoner = GeminiReasoner::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;

use crate::domain::foundation::Price;
use crate::domain::negotiation::{AiDecision, BuyerIntent, NegotiationDecision};
use crate::ports::{NegotiationReasoner, NegotiationRequest, ReasonerError};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini reasoner.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct GeminiReasoner {
    config: GeminiConfig,
    client: Client,
}

impl GeminiReasoner {
    /// # Errors
    ///
    /// - `Unavailable` if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> Result<Self, ReasonerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReasonerError::unavailable(format!("HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn send(&self, prompt: String) -> Result<Response, ReasonerError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReasonerError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ReasonerError::Network(format!("Connection failed: {}", e))
                } else {
                    ReasonerError::Network(e.to_string())
                }
            })
    }

    async fn check_status(response: Response) -> Result<Response, ReasonerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(ReasonerError::AuthenticationFailed),
            429 | 500..=599 => Err(ReasonerError::unavailable(format!(
                "status {}: {}",
                status, error_body
            ))),
            _ => Err(ReasonerError::Network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl NegotiationReasoner for GeminiReasoner {
    async fn generate(
        &self,
        request: NegotiationRequest,
    ) -> Result<NegotiationDecision, ReasonerError> {
        tracing::debug!(
            current_price = request.current_price.amount(),
            initial_price = request.initial_price.amount(),
            floor_price = request.floor_price.amount(),
            retry = request.is_retry(),
            "requesting negotiation decision"
        );

        let response = self.send(build_prompt(&request)).await?;
        let response = Self::check_status(response).await?;

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ReasonerError::malformed(format!("response envelope: {}", e)))?;

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| ReasonerError::malformed("empty response"))?;

        parse_decision(&text).map_err(|e| {
            tracing::warn!(raw = %text, "unparseable negotiation decision");
            e
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Prompt
// ════════════════════════════════════════════════════════════════════════════

const PERSONA: &str = r#"You act as the SELLER on a second-hand marketplace and reply to a BUYER.
Sell at the highest price you reasonably can while staying courteous.

Strategy:
- Never simply meet the buyer halfway. Let the market context set the size of any discount.
- Many views mean strong demand: concede little or nothing.
- Few views after a long listing mean weak demand: be more flexible, but stay above the floor.
- Never propose a price higher than one you already offered earlier in the conversation.
- The floor price is absolute. Never go below it."#;

const INSTRUCTIONS: &str = r#"Steps:
1. Classify the buyer's intent.
   - AGREEMENT: the buyer accepts an offered price or says they will buy. Decide ACCEPT.
   - QUESTION: the buyer asks about the item. Decide ANSWER using only the item description.
     If the description does not say, admit you do not know. Do not invent details.
   - NEGOTIATION: the buyer proposes a lower price.
2. Set detected_price to the price the buyer proposed or agreed to (0 if none).
3. For NEGOTIATION:
   - Below the floor: REJECT politely.
   - Otherwise COUNTER near the current price when demand is strong, or ACCEPT or COUNTER
     slightly lower when demand is weak. Set counter_price to your price.
4. Reply with a single JSON object and nothing else:
{
  "intent": "NEGOTIATION" | "AGREEMENT" | "QUESTION",
  "decision": "ACCEPT" | "REJECT" | "COUNTER" | "ANSWER",
  "detected_price": <integer>,
  "counter_price": <integer>,
  "reasoning": "<why, addressed to the seller>",
  "response_content": "<the message to the buyer>"
}"#;

/// Render the full prompt for one request.
pub fn build_prompt(request: &NegotiationRequest) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "{}\n", PERSONA);

    let _ = writeln!(prompt, "Listing:");
    let _ = writeln!(prompt, "- Initial price: {}", request.initial_price);
    let _ = writeln!(prompt, "- Current price: {}", request.current_price);
    let _ = writeln!(prompt, "- Floor price: {}", request.floor_price);
    let _ = writeln!(prompt, "- Views: {}", request.view_count);
    let _ = writeln!(prompt, "- Days listed: {}", request.days_listed);
    let _ = writeln!(prompt, "- Description: \"{}\"\n", request.item_description);

    let _ = writeln!(prompt, "Conversation so far:");
    if request.history.is_empty() {
        let _ = writeln!(prompt, "(none)");
    }
    for entry in &request.history {
        let _ = writeln!(prompt, "- {}: {}", entry.role, entry.content);
    }

    let _ = writeln!(prompt, "\nLatest buyer message:\n\"{}\"\n", request.buyer_message);

    if let Some(instruction) = &request.retry_instruction {
        let _ = writeln!(prompt, "The seller rejected your previous draft.");
        let _ = writeln!(
            prompt,
            "- Previous draft: \"{}\"",
            request.previous_draft_content.as_deref().unwrap_or("")
        );
        let _ = writeln!(
            prompt,
            "- Previous reasoning: \"{}\"",
            request.previous_draft_reasoning.as_deref().unwrap_or("")
        );
        let _ = writeln!(prompt, "- Seller's instruction: \"{}\"", instruction);
        let _ = writeln!(
            prompt,
            "Write a new reply that follows the seller's instruction.\n"
        );
    }

    prompt.push_str(INSTRUCTIONS);
    prompt
}

// ════════════════════════════════════════════════════════════════════════════
// Response parsing
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawDecision {
    #[serde(default)]
    intent: Option<BuyerIntent>,
    decision: String,
    #[serde(default)]
    detected_price: i64,
    #[serde(default)]
    counter_price: i64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    response_content: String,
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Parse model output into a decision.
///
/// Accepts a bare object, a fenced object, or an array whose first element
/// is the object.
pub fn parse_decision(text: &str) -> Result<NegotiationDecision, ReasonerError> {
    let cleaned = strip_code_fence(text);

    let raw = match serde_json::from_str::<RawDecision>(cleaned) {
        Ok(raw) => raw,
        Err(object_err) => serde_json::from_str::<Vec<RawDecision>>(cleaned)
            .ok()
            .and_then(|list| list.into_iter().next())
            .ok_or_else(|| ReasonerError::malformed(object_err.to_string()))?,
    };

    let decision: AiDecision = raw
        .decision
        .parse()
        .map_err(|e: crate::domain::foundation::ValidationError| {
            ReasonerError::malformed(e.to_string())
        })?;

    if raw.response_content.trim().is_empty() {
        return Err(ReasonerError::malformed("missing response_content"));
    }

    let price = |value: i64, field: &str| {
        Price::new(value).map_err(|_| ReasonerError::malformed(format!("negative {}", field)))
    };

    Ok(NegotiationDecision {
        intent: raw.intent.unwrap_or(BuyerIntent::Unknown),
        decision,
        detected_price: price(raw.detected_price, "detected_price")?,
        counter_price: price(raw.counter_price, "counter_price")?,
        reasoning: raw.reasoning,
        response_text: raw.response_content,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}
