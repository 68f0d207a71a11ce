//! The request/response contract with the hosted model.
//!
//! The response schema is not ours and differs between model versions, so the
//! answer is located by trying a fixed, ordered list of extractors.

use crate::error::{InferenceError, Result};
use crate::prompt::GenerationRequest;
use serde_json::Value;
use tracing::{debug, info, warn};

pub const CONTENT_TYPE: &str = "application/json";

/// One blocking model invocation: a JSON request body in, the fully read
/// response body out.
pub trait InvokeModel {
    fn invoke_model(&self, body: Vec<u8>) -> Result<Vec<u8>, InferenceError>;
}

impl<T: InvokeModel + ?Sized> InvokeModel for &T {
    fn invoke_model(&self, body: Vec<u8>) -> Result<Vec<u8>, InferenceError> {
        (**self).invoke_model(body)
    }
}

type Extractor = fn(&Value) -> Option<&Value>;

/// Tried in order, the first truthy hit wins. The whole body is the fallback.
const EXTRACTORS: &[(&str, Extractor)] = &[("outputText", output_text), ("results", results)];

fn output_text(body: &Value) -> Option<&Value> {
    body.get("outputText")
}

fn results(body: &Value) -> Option<&Value> {
    body.get("results")
}

/// Empty and zero-like values count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

pub fn extract(body: &Value) -> &Value {
    EXTRACTORS
        .iter()
        .find_map(|(name, extractor)| {
            extractor(body).filter(|v| is_truthy(v)).inspect(|_| {
                debug!(field = *name, "extracted answer");
            })
        })
        .unwrap_or_else(|| {
            debug!("no known answer field, using the whole response");
            body
        })
}

pub fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Bodies that are not JSON are kept as text rather than failing the run.
pub fn decode(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!(error = %err, "response body is not JSON, printing it as text");
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

pub fn infer(invoker: &impl InvokeModel, request: &GenerationRequest) -> Result<String> {
    let body = serde_json::to_vec(request)?;
    info!(bytes = body.len(), "invoking model");

    let response = invoker.invoke_model(body)?;
    debug!(bytes = response.len(), "received response");

    let decoded = decode(&response);
    Ok(render(extract(&decoded)))
}
