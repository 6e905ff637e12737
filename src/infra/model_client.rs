use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::core::error::CollaboratorError;
use crate::core::ports::{ConditionScorer, PredictionProvider};
use crate::models::prediction::{PredictionSet, RawPrediction};
use crate::models::schema::TableSchema;

fn build_client(timeout: Duration) -> Result<Client, CollaboratorError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    question: &'a str,
    headers: [Vec<String>; 2],
}

/// 列分类模型服务客户端: POST {base}/predict
pub struct HttpPredictionProvider {
    client: Client,
    endpoint: String,
}

impl HttpPredictionProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl PredictionProvider for HttpPredictionProvider {
    async fn predict(
        &self,
        question: &str,
        schema: &TableSchema,
    ) -> Result<PredictionSet, CollaboratorError> {
        let raw: RawPrediction = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest {
                question,
                headers: schema.headers(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("分类器原始输出: {:?}", raw);
        raw.decode()
    }
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    question: &'a str,
    condition: &'a str,
}

#[derive(Deserialize)]
struct ScoreResponse {
    probability: f64,
}

/// 条件打分模型服务客户端: POST {base}/score
pub struct HttpConditionScorer {
    client: Client,
    endpoint: String,
}

impl HttpConditionScorer {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: format!("{}/score", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ConditionScorer for HttpConditionScorer {
    async fn score(&self, question: &str, condition: &str) -> Result<f64, CollaboratorError> {
        let resp: ScoreResponse = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest {
                question,
                condition,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.probability)
    }
}
