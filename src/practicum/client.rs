use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::ENDPOINT;
use crate::error::{BotError, Result};

/// The single API call the poller needs. Behind a trait so the loop step can
/// be exercised against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch homework statuses changed since `from_date` (Unix timestamp).
    async fn get_homework_statuses(&self, from_date: i64) -> Result<Value>;
}

pub struct PracticumClient {
    http: reqwest::Client,
    token: String,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: &str) -> Self {
        Self::with_endpoint(token, ENDPOINT)
    }

    pub fn with_endpoint(token: &str, endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_homework_statuses(&self, from_date: i64) -> Result<Value> {
        debug!("GET {} from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(BotError::Endpoint(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
