use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn, Span};
use uuid::Uuid;

use crate::core::engine::SynthesisEngine;
use crate::core::error::{CollaboratorError, SynthesisError};
use crate::core::ports::{PredictionProvider, TableDataProvider};
use crate::models::context::{HeaderInfo, Nl2SqlAnswer};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error("table data unavailable: {0}")]
    Data(#[source] CollaboratorError),
}

/// 问题 -> 分类器 -> 合成 -> (可选) 执行 的完整流水线
pub struct Nl2SqlService {
    engine: SynthesisEngine,
    predictor: Arc<dyn PredictionProvider>,
    tables: Arc<dyn TableDataProvider>,
}

impl Nl2SqlService {
    pub fn new(
        engine: SynthesisEngine,
        predictor: Arc<dyn PredictionProvider>,
        tables: Arc<dyn TableDataProvider>,
    ) -> Self {
        Self {
            engine,
            predictor,
            tables,
        }
    }

    #[instrument(skip(self), fields(request_id = tracing::field::Empty))]
    pub async fn answer(
        &self,
        question: &str,
        table_name: &str,
        execute: bool,
    ) -> Result<Nl2SqlAnswer, ServiceError> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", tracing::field::display(request_id));
        info!("收到 NL2SQL 请求: table={} question={}", table_name, question);

        let schema = self.tables.schema(table_name).await.map_err(ServiceError::Data)?;
        if schema.is_empty() {
            warn!("表不存在或没有列: {}", table_name);
            return Err(ServiceError::UnknownTable(table_name.to_string()));
        }
        let rows = self.tables.rows(table_name).await.map_err(ServiceError::Data)?;

        let predictions = self.predictor.predict(question, &schema).await.map_err(|e| {
            warn!("分类器调用失败: {}", e);
            SynthesisError::PredictionUnavailable(e.to_string())
        })?;

        let sql = self
            .engine
            .synthesize(question, &schema, &predictions, &rows, table_name)
            .await?;

        let rows = if execute {
            Some(self.tables.execute(&sql).await.map_err(ServiceError::Data)?)
        } else {
            None
        };

        Ok(Nl2SqlAnswer {
            request_id,
            sql,
            rows,
        })
    }

    pub async fn list_tables(&self) -> Result<Vec<String>, ServiceError> {
        self.tables.list_tables().await.map_err(ServiceError::Data)
    }

    pub async fn headers(&self, table_name: &str) -> Result<Vec<HeaderInfo>, ServiceError> {
        let schema = self.tables.schema(table_name).await.map_err(ServiceError::Data)?;
        if schema.is_empty() {
            return Err(ServiceError::UnknownTable(table_name.to_string()));
        }
        Ok(schema
            .columns
            .into_iter()
            .map(|c| HeaderInfo {
                name: c.name,
                kind: c.kind,
            })
            .collect())
    }
}
