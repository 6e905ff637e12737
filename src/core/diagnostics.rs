use serde::Serialize;
use std::sync::Mutex;
use tracing::info;

use crate::models::prediction::Connector;
use crate::models::query::SelectTerm;

/// 合成过程中的中间决策记录，仅用于离线排查
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SynthesisEvent {
    ColumnsSelected { terms: Vec<SelectTerm> },
    FallbackApplied { ratios: Vec<f64>, chosen: String },
    CandidatesGenerated { column: String, literals: Vec<String> },
    EmptyCandidateSet { column: String },
    CandidatesScored { column: String, scores: Vec<(String, f64)> },
    ScoreOverridden { column: String, literal: String, raw: f64 },
    ConnectorForced { from: Connector, to: Connector },
    QueryBuilt { sql: String },
}

pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &SynthesisEvent);
}

/// 以结构化 tracing 记录输出诊断事件
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &SynthesisEvent) {
        let payload = serde_json::to_string(event).unwrap_or_default();
        info!(target: "nl2sql::diagnostics", payload = %payload, "synthesis decision");
    }
}

/// 收集事件到内存，测试用
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SynthesisEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SynthesisEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: &SynthesisEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
