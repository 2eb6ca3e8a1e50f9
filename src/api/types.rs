//! Request and response bodies of the scoring backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{AnalysisResult, SentimentClass};
use crate::error::{ClientError, Result};

#[derive(Debug, Serialize)]
pub struct TextRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CommentsRequest<'a> {
    pub comments: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct MacroF1Request<'a> {
    pub y_true: &'a [i64],
    pub y_pred: &'a [i64],
}

#[derive(Debug, Deserialize)]
pub struct MacroF1Response {
    pub f1: f64,
}

/// One scored comment as the backend sends it.
///
/// Older backends omit `id`, send `source` instead of `src`, and repeat the
/// input under `text`; all of those shapes are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub sentiment_class: i64,
    pub score: f64,
    #[serde(default, alias = "source")]
    pub src: Option<String>,
}

impl SentimentItem {
    pub fn into_result(self, id: i64) -> Result<AnalysisResult> {
        let sentiment = SentimentClass::try_from(self.sentiment_class)?;
        let text = self.comment.or(self.text).unwrap_or_default();
        AnalysisResult::new(id, text, sentiment, self.score, self.src)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionItem {
    pub sentiment_class: i64,
}

/// Coerces a response body to a list: a bare object becomes a one-element
/// list. An object carrying an `error` string is turned into an error.
pub fn normalize(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => {
            if let Some(Value::String(message)) = map.get("error") {
                return Err(ClientError::Decode(message.clone()));
            }
            Ok(vec![Value::Object(map)])
        }
        other => Err(ClientError::Decode(format!(
            "expected an object or an array, got {}",
            kind(&other)
        ))),
    }
}

pub fn parse_items<T: serde::de::DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    normalize(value)?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ClientError::from))
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
