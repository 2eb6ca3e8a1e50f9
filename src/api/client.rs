//! Blocking HTTP client for the scoring backend.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::types::{
    parse_items, CommentsRequest, MacroF1Request, MacroF1Response, PredictionItem,
    SentimentItem, TextRequest,
};
use crate::analysis::{AnalysisResult, SentimentClass};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// The four backend operations the client relies on.
pub trait SentimentBackend: Send + Sync {
    /// Scores one text. Ids come from the backend, or the item position when
    /// the backend sends none.
    fn analyze_text(&self, text: &str) -> Result<Vec<AnalysisResult>>;

    /// Scores a batch. Ids are the item positions `0..n`.
    fn analyze_batch(&self, comments: &[String]) -> Result<Vec<AnalysisResult>>;

    /// Predicted class codes, in input order.
    fn predict_batch(&self, comments: &[String]) -> Result<Vec<i64>>;

    fn macro_f1(&self, y_true: &[i64], y_pred: &[i64]) -> Result<f64>;
}

pub struct BackendClient {
    client: Client,
    config: ClientConfig,
}

impl BackendClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// One attempt, no retry. Non-2xx answers become [`ClientError::Status`].
    fn post_json<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<Value> {
        let url = self.config.url(endpoint);
        debug!(%url, "POST");

        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(%url, status = status.as_u16(), bytes = text.len(), "Response received");
        Ok(serde_json::from_str(&text)?)
    }
}

impl SentimentBackend for BackendClient {
    fn analyze_text(&self, text: &str) -> Result<Vec<AnalysisResult>> {
        let value = self.post_json(&self.config.endpoints.analyze_text, &TextRequest { text })?;
        parse_items::<SentimentItem>(value)?
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let id = item.id.unwrap_or(i as i64);
                item.into_result(id)
            })
            .collect()
    }

    fn analyze_batch(&self, comments: &[String]) -> Result<Vec<AnalysisResult>> {
        let value = self.post_json(&self.config.endpoints.analyze, &CommentsRequest { comments })?;
        parse_items::<SentimentItem>(value)?
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.into_result(i as i64))
            .collect()
    }

    fn predict_batch(&self, comments: &[String]) -> Result<Vec<i64>> {
        let value = self.post_json(
            &self.config.endpoints.analyze_text_batch,
            &CommentsRequest { comments },
        )?;
        parse_items::<PredictionItem>(value)?
            .into_iter()
            .map(|item| SentimentClass::try_from(item.sentiment_class).map(SentimentClass::code))
            .collect()
    }

    fn macro_f1(&self, y_true: &[i64], y_pred: &[i64]) -> Result<f64> {
        let value = self.post_json(&self.config.endpoints.macro_f1, &MacroF1Request { y_true, y_pred })?;
        let response: MacroF1Response = serde_json::from_value(value)?;
        Ok(response.f1)
    }
}
