use serde::Serialize;

pub const PROMPT_HEADER: &str = "You are an assistant analyzing Kubernetes + Dapr test output.\n\
Summarize the following logs, highlight any errors or warnings, and confirm whether the pub/sub test succeeded.\n\
\n\
Logs:\n";

pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_TOP_P: f64 = 0.9;
pub const DEFAULT_MAX_TOKEN_COUNT: u32 = 1024;

/// Sampling parameters sent as `textGenerationConfig`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub max_token_count: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

impl Default for TextGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_token_count: DEFAULT_MAX_TOKEN_COUNT,
            stop_sequences: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub input_text: String,
    pub text_generation_config: TextGenerationConfig,
}

pub fn build(log_text: &str, generation: &TextGenerationConfig) -> GenerationRequest {
    let mut input_text = String::with_capacity(PROMPT_HEADER.len() + log_text.len());
    input_text.push_str(PROMPT_HEADER);
    input_text.push_str(log_text);

    GenerationRequest {
        input_text,
        text_generation_config: generation.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_is_header_then_log() {
        for log in ["", "pubsub test: OK\nno errors", "ünïcødé \u{0}\u{7}\r\n\t\"quoted\""] {
            let request = build(log, &TextGenerationConfig::default());
            assert!(request.input_text.starts_with(PROMPT_HEADER));
            assert!(request.input_text.ends_with(log));
            assert_eq!(request.input_text.len(), PROMPT_HEADER.len() + log.len());
        }
    }

    #[test]
    fn default_parameters_do_not_depend_on_input() {
        let long = "long line\n".repeat(1000);
        for log in ["", "x", long.as_str()] {
            let config = build(log, &TextGenerationConfig::default()).text_generation_config;
            assert_eq!(config.temperature, 0.3);
            assert_eq!(config.top_p, 0.9);
            assert_eq!(config.max_token_count, 1024);
        }
    }

    #[test]
    fn wire_shape() {
        let request = build("boom", &TextGenerationConfig::default());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "inputText": format!("{PROMPT_HEADER}boom"),
                "textGenerationConfig": {
                    "temperature": 0.3,
                    "topP": 0.9,
                    "maxTokenCount": 1024
                }
            })
        );
    }

    #[test]
    fn stop_sequences_are_sent_when_set() {
        let generation = TextGenerationConfig {
            stop_sequences: vec!["\n\n".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(build("", &generation)).unwrap();

        assert_eq!(value["textGenerationConfig"]["stopSequences"], json!(["\n\n"]));
    }
}
