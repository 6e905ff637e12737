//! 合成引擎依赖的外部协作方接口。引擎本身不持有任何模型状态，
//! 所有能力都通过这些 trait 注入。

use async_trait::async_trait;
use serde_json::Value;

use super::error::CollaboratorError;
use crate::models::prediction::PredictionSet;
use crate::models::schema::{RowSet, TableSchema};

/// 上游列分类器 (聚合 / 条件运算符 / 连接词)
#[async_trait]
pub trait PredictionProvider: Send + Sync {
    async fn predict(
        &self,
        question: &str,
        schema: &TableSchema,
    ) -> Result<PredictionSet, CollaboratorError>;
}

/// 成对打分模型: (问题, 序列化条件) -> 概率
#[async_trait]
pub trait ConditionScorer: Send + Sync {
    async fn score(&self, question: &str, condition: &str) -> Result<f64, CollaboratorError>;
}

/// 从问题文本中抽取数值字面量
pub trait NumericExtractor: Send + Sync {
    fn extract(&self, question: &str) -> Vec<String>;
}

#[async_trait]
pub trait TableDataProvider: Send + Sync {
    async fn schema(&self, table_name: &str) -> Result<TableSchema, CollaboratorError>;

    async fn rows(&self, table_name: &str) -> Result<RowSet, CollaboratorError>;

    async fn list_tables(&self) -> Result<Vec<String>, CollaboratorError>;

    /// 执行合成出的 SQL，行以 JSON 对象返回
    async fn execute(&self, sql: &str) -> Result<Vec<Value>, CollaboratorError>;
}
