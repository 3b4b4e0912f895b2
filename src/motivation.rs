use crate::config::MotivationConfig;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

pub const MISSING_KEY_MESSAGE: &str = "Don't wobble! Keep going! (Configure API Key for AI tips)";
pub const EMPTY_REPLY_MESSAGE: &str = "Keep wobbling forward! 🍮";
pub const FALLBACK_MESSAGE: &str = "You're doing great! Keep it up! 🍮";

const MODEL: &str = "gemini-2.5-flash";

/// Short motivational lines from a remote generative model. Every failure
/// degrades to a canned message, so callers always get text back.
#[derive(Clone)]
pub struct MotivationClient {
    http: reqwest::Client,
    config: MotivationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl MotivationClient {
    pub fn new(config: MotivationConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!("failed to build motivation http client, using defaults: {err}");
                reqwest::Client::new()
            });
        Self { http, config }
    }

    pub async fn get_motivation(&self, phase_name: &str, completed_days: u32) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        match self.request(api_key, phase_name, completed_days).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_REPLY_MESSAGE.to_string(),
            Err(err) => {
                warn!("motivation request failed: {err}");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    async fn request(
        &self,
        api_key: &str,
        phase_name: &str,
        completed_days: u32,
    ) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/models/{MODEL}:generateContent",
            self.config.base_url.trim_end_matches('/')
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(phase_name, completed_days) }] }],
            "generationConfig": { "thinkingConfig": { "thinkingBudget": 0 } },
        });

        let reply: GenerateResponse = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = first_text(reply);
        debug!(empty = text.is_none(), "motivation reply received");
        Ok(text)
    }
}

fn first_text(reply: GenerateResponse) -> Option<String> {
    reply
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
}

fn phase_context(phase_name: &str) -> &'static str {
    if phase_name.contains("Detox") {
        "Provide a motivational tip specifically about starting strong and overcoming initial resistance/cravings."
    } else if phase_name.contains("Adaptation") {
        "Provide a tip specifically about building consistent habits and making the routine stick."
    } else if phase_name.contains("Lifestyle") {
        "Provide a strategy or encouragement specifically for long-term maintenance and keeping the weight off."
    } else {
        ""
    }
}

pub fn build_prompt(phase_name: &str, completed_days: u32) -> String {
    format!(
        "You are a cute, bouncy, energetic Gelatin mascot named \"Jelly\". \
         The user is on the \"{phase_name}\" of their weight loss journey and has completed {completed_days} days in total. \
         {context} \
         Make the response very short (max 20 words), funny, and encouraging. \
         Incorporate gelatin/wobbling puns if appropriate. Use emojis.",
        context = phase_context(phase_name),
    )
}
