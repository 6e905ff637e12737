#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nl2sql_backend::config::SynthesisConfig;
use nl2sql_backend::core::engine::SynthesisEngine;
use nl2sql_backend::core::error::CollaboratorError;
use nl2sql_backend::core::ports::{
    ConditionScorer, NumericExtractor, PredictionProvider, TableDataProvider,
};
use nl2sql_backend::models::prediction::PredictionSet;
use nl2sql_backend::models::schema::{ColumnKind, ColumnMeta, RowSet, TableSchema};

/// 按序列化条件查表返回分数，未登记的条件视为调用失败
#[derive(Default)]
pub struct TableScorer {
    scores: HashMap<String, f64>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl TableScorer {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            scores: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ConditionScorer for TableScorer {
    async fn score(&self, _question: &str, condition: &str) -> Result<f64, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.scores
            .get(condition)
            .copied()
            .ok_or_else(|| CollaboratorError::InvalidResponse(format!("no score for {condition}")))
    }
}

pub struct FixedNumbers(pub Vec<&'static str>);

impl NumericExtractor for FixedNumbers {
    fn extract(&self, _question: &str) -> Vec<String> {
        self.0.iter().map(|s| s.to_string()).collect()
    }
}

pub struct FixedPredictor(pub Option<PredictionSet>);

#[async_trait]
impl PredictionProvider for FixedPredictor {
    async fn predict(
        &self,
        _question: &str,
        _schema: &TableSchema,
    ) -> Result<PredictionSet, CollaboratorError> {
        self.0
            .clone()
            .ok_or_else(|| CollaboratorError::InvalidResponse("classifier offline".into()))
    }
}

/// 内存表数据源
#[derive(Default)]
pub struct MemoryTables {
    pub tables: HashMap<String, (TableSchema, RowSet)>,
    pub executed: std::sync::Mutex<Vec<String>>,
}

impl MemoryTables {
    pub fn with_table(mut self, name: &str, schema: TableSchema, rows: RowSet) -> Self {
        self.tables.insert(name.to_string(), (schema, rows));
        self
    }
}

#[async_trait]
impl TableDataProvider for MemoryTables {
    async fn schema(&self, table_name: &str) -> Result<TableSchema, CollaboratorError> {
        Ok(self
            .tables
            .get(table_name)
            .map(|(s, _)| s.clone())
            .unwrap_or_default())
    }

    async fn rows(&self, table_name: &str) -> Result<RowSet, CollaboratorError> {
        Ok(self
            .tables
            .get(table_name)
            .map(|(_, r)| r.clone())
            .unwrap_or_default())
    }

    async fn list_tables(&self) -> Result<Vec<String>, CollaboratorError> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn execute(&self, sql: &str) -> Result<Vec<Value>, CollaboratorError> {
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(vec![json!({ "ok": 1 })])
    }
}

pub fn schema(cols: &[(&str, ColumnKind)]) -> TableSchema {
    TableSchema::new(cols.iter().map(|(n, k)| ColumnMeta::new(*n, *k)).collect())
}

pub fn stock_schema() -> TableSchema {
    schema(&[
        ("股票名称", ColumnKind::Categorical),
        ("周涨跌幅", ColumnKind::Numeric),
    ])
}

pub fn stock_rows() -> RowSet {
    RowSet::new(vec![
        vec![json!("搜房网"), json!(10)],
        vec![json!("人人网"), json!(50)],
        vec![json!("長榮"), json!(10)],
    ])
}

pub fn engine(scorer: Arc<dyn ConditionScorer>, numbers: Vec<&'static str>) -> SynthesisEngine {
    SynthesisEngine::new(scorer, SynthesisConfig::default())
        .with_extractor(Arc::new(FixedNumbers(numbers)))
}
