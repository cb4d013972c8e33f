//! Ask/chat request payloads and their optional overrides.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// Backend search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    Hybrid,
    Vectors,
    Text,
}

/// Backend answering pipeline, selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approach {
    /// Plain OpenAI SDK retrieve-then-read.
    #[serde(rename = "jos")]
    OpenAiSdk,
    #[serde(rename = "jsk")]
    SemanticKernel,
    /// Semantic Kernel with vector-store memory.
    #[serde(rename = "jskv")]
    SemanticKernelVectors,
    #[serde(rename = "jskp")]
    SemanticKernelPlanner,
}

/// How a Semantic Kernel approach orchestrates its steps. Backends default to `Chains`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticKernelMode {
    Chains,
    Planner,
}

/// Optional knobs forwarded to the backend. An unset field is omitted from
/// the JSON body entirely, so the backend applies its own default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_mode: Option<RetrievalMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_ranker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_captions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_followup_questions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_oid_security_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_groups_security_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_kernel_mode: Option<SemanticKernelMode>,
    /// Mirrors the top-level `stream` flag for backends that read it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl RequestOverrides {
    pub fn retrieval_mode(mut self, mode: RetrievalMode) -> Self {
        self.retrieval_mode = Some(mode);
        self
    }

    pub fn top(mut self, n: u32) -> Self {
        self.top = Some(n);
        self
    }

    pub fn temperature(mut self, t: f64) -> Self {
        self.temperature = Some(t);
        self
    }

    pub fn semantic_ranker(mut self, enable: bool) -> Self {
        self.semantic_ranker = Some(enable);
        self
    }

    pub fn semantic_captions(mut self, enable: bool) -> Self {
        self.semantic_captions = Some(enable);
        self
    }

    pub fn exclude_category(mut self, category: impl Into<String>) -> Self {
        self.exclude_category = Some(category.into());
        self
    }

    pub fn suggest_followup_questions(mut self, enable: bool) -> Self {
        self.suggest_followup_questions = Some(enable);
        self
    }

    pub fn semantic_kernel_mode(mut self, mode: SemanticKernelMode) -> Self {
        self.semantic_kernel_mode = Some(mode);
        self
    }

    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = Some(template.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub overrides: RequestOverrides,
}

/// Body of both `/ask` and `/chat`. For ask, `messages` holds the single question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatAppRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub context: RequestContext,
    /// Set by the client from the entry point used (`chat` vs `chat_stream`).
    #[serde(default)]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach: Option<Approach>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_state: Option<serde_json::Value>,
}

impl ChatAppRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Single-turn request for `/ask`.
    pub fn question(text: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::user(text)])
    }

    pub fn with_overrides(mut self, overrides: RequestOverrides) -> Self {
        self.context.overrides = overrides;
        self
    }

    pub fn with_approach(mut self, approach: Approach) -> Self {
        self.approach = Some(approach);
        self
    }

    pub fn with_session_state(mut self, state: serde_json::Value) -> Self {
        self.session_state = Some(state);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_with_only_temperature_serialize_that_field_alone() {
        let v = serde_json::to_value(RequestOverrides::default().temperature(0.3)).unwrap();
        assert_eq!(v, serde_json::json!({"temperature": 0.3}));
    }

    #[test]
    fn retrieval_mode_uses_wire_names() {
        let v = serde_json::to_value(
            RequestOverrides::default()
                .retrieval_mode(RetrievalMode::Vectors)
                .top(3)
                .semantic_ranker(true),
        )
        .unwrap();
        assert_eq!(
            v,
            serde_json::json!({"retrieval_mode": "vectors", "top": 3, "semantic_ranker": true})
        );
    }

    #[test]
    fn request_body_shape() {
        let req = ChatAppRequest::question("What is covered?")
            .with_overrides(RequestOverrides::default().exclude_category("hr"));
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "messages": [{"role": "user", "content": "What is covered?"}],
                "context": {"overrides": {"exclude_category": "hr"}},
                "stream": false
            })
        );
    }

    #[test]
    fn approach_and_kernel_mode_use_backend_names() {
        let req = ChatAppRequest::question("Summarize the handbook")
            .with_approach(Approach::SemanticKernelPlanner)
            .with_overrides(
                RequestOverrides::default().semantic_kernel_mode(SemanticKernelMode::Planner),
            );
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["approach"], "jskp");
        assert_eq!(v["context"]["overrides"], serde_json::json!({"semantic_kernel_mode": "planner"}));

        let names: Vec<serde_json::Value> = [
            Approach::OpenAiSdk,
            Approach::SemanticKernel,
            Approach::SemanticKernelVectors,
        ]
        .iter()
        .map(|a| serde_json::to_value(a).unwrap())
        .collect();
        assert_eq!(names, vec!["jos", "jsk", "jskv"]);
    }

    #[test]
    fn unset_approach_and_kernel_mode_are_omitted() {
        let v = serde_json::to_value(ChatAppRequest::question("hi")).unwrap();
        assert!(v.get("approach").is_none());
        assert!(v["context"]["overrides"].get("semantic_kernel_mode").is_none());

        let parsed: RequestOverrides =
            serde_json::from_str(r#"{"semantic_kernel_mode":"chains"}"#).unwrap();
        assert_eq!(parsed.semantic_kernel_mode, Some(SemanticKernelMode::Chains));
    }
}
