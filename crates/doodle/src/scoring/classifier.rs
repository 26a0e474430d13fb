use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::normalize::clamp_confidence;
use crate::config::ClassifierConfig;
use crate::error::{Error, Result};

/// Vision model that guesses what a doodle depicts.
///
/// Implementations return the model's raw text; it is expected to contain
/// one JSON object `{"guess": "...", "confidence": 0..1}`.
pub trait Classifier: Send + Sync {
    fn complete(&self, instructions: &str, target_word: &str, image_png: &[u8]) -> Result<String>;
}

/// Structured classifier answer, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierGuess {
    pub guess: String,
    /// Already clamped into `[0, 1]`.
    pub confidence: f64,
}

#[derive(Deserialize)]
struct RawGuess {
    guess: Value,
    #[serde(default)]
    confidence: Value,
}

/// Slice from the first `{` to the last `}`, if that span exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Two-stage parse of free-form model output.
///
/// Returns `None` when no JSON object with a string `guess` can be extracted.
/// A missing or non-numeric confidence becomes 0.
pub fn parse_guess(text: &str) -> Option<ClassifierGuess> {
    let raw: RawGuess = serde_json::from_str(extract_json_object(text)?).ok()?;
    let guess = raw.guess.as_str()?.to_string();
    let confidence = match &raw.confidence {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Some(ClassifierGuess {
        guess,
        confidence: clamp_confidence(confidence),
    })
}

/// Classifier backed by the OpenAI Responses API.
pub struct OpenAiClassifier {
    agent: ureq::Agent,
    api_key: String,
    model: String,
    api_base: String,
}

#[derive(Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    /// Concatenated `output_text` parts (the raw API has no aggregate field).
    fn text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|c| c.kind == "output_text")
            .filter_map(|c| c.text)
            .collect()
    }
}

impl OpenAiClassifier {
    pub fn new(api_key: String, config: &ClassifierConfig) -> Self {
        Self::with_timeout(api_key, config, config.timeout())
    }

    pub fn with_timeout(api_key: String, config: &ClassifierConfig, timeout: Duration) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: agent_config.into(),
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn request_body(&self, instructions: &str, target_word: &str, image_png: &[u8]) -> Value {
        let image_url = format!("data:image/png;base64,{}", STANDARD.encode(image_png));
        json!({
            "model": self.model,
            "input": [
                {
                    "role": "developer",
                    "content": [{ "type": "input_text", "text": instructions }],
                },
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "input_text",
                            "text": format!("Target word: \"{}\". Guess the doodle.", target_word),
                        },
                        { "type": "input_image", "image_url": image_url },
                    ],
                },
            ],
        })
    }
}

impl Classifier for OpenAiClassifier {
    fn complete(&self, instructions: &str, target_word: &str, image_png: &[u8]) -> Result<String> {
        let url = format!("{}/responses", self.api_base);
        let body = self.request_body(instructions, target_word, image_png);

        debug!("Requesting classification from {} ({})", url, self.model);
        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)?;

        let reply: ResponsesReply = response.body_mut().read_json()?;
        Ok(reply.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(
            extract_json_object(r#"{"guess":"cat"}"#),
            Some(r#"{"guess":"cat"}"#)
        );
    }

    #[test]
    fn test_extract_wrapped_in_prose() {
        let text = "Sure! Here you go:\n```json\n{\"guess\": \"cat\", \"confidence\": 0.9}\n```";
        assert_eq!(
            extract_json_object(text),
            Some("{\"guess\": \"cat\", \"confidence\": 0.9}")
        );
    }

    #[test]
    fn test_extract_missing_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
        assert_eq!(extract_json_object("{ only open"), None);
    }

    #[test]
    fn test_parse_guess() {
        let parsed = parse_guess(r#"{"guess":"Cat","confidence":0.92}"#).unwrap();
        assert_eq!(parsed.guess, "Cat");
        assert_eq!(parsed.confidence, 0.92);
    }

    #[test]
    fn test_parse_guess_defensive_confidence() {
        assert_eq!(
            parse_guess(r#"{"guess":"cat","confidence":1.7}"#)
                .unwrap()
                .confidence,
            1.0
        );
        assert_eq!(
            parse_guess(r#"{"guess":"cat","confidence":"0.5"}"#)
                .unwrap()
                .confidence,
            0.5
        );
        assert_eq!(
            parse_guess(r#"{"guess":"cat","confidence":"high"}"#)
                .unwrap()
                .confidence,
            0.0
        );
        assert_eq!(parse_guess(r#"{"guess":"cat"}"#).unwrap().confidence, 0.0);
    }

    #[test]
    fn test_parse_guess_rejects_malformed() {
        assert!(parse_guess("I think it's a cat").is_none());
        assert!(parse_guess(r#"{"guess": 42, "confidence": 0.9}"#).is_none());
        assert!(parse_guess(r#"{"confidence": 0.9}"#).is_none());
        assert!(parse_guess(r#"{"guess": "cat", }"#).is_none());
    }

    #[test]
    fn test_reply_text_from_output_items() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{"output":[{"type":"message","content":[
                {"type":"output_text","text":"{\"guess\":"},
                {"type":"output_text","text":"\"cat\"}"}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(reply.text(), r#"{"guess":"cat"}"#);
    }

    #[test]
    fn test_request_body_shape() {
        let classifier = OpenAiClassifier::new("key".to_string(), &ClassifierConfig::default());
        let body = classifier.request_body("instr", "cat", b"png");
        assert_eq!(body["model"], "gpt-4.1-mini");
        assert_eq!(body["input"][0]["content"][0]["text"], "instr");
        assert_eq!(
            body["input"][1]["content"][1]["image_url"],
            "data:image/png;base64,cG5n"
        );
    }
}
