use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::candidates::generate_candidates;
use super::column_selector::select_columns;
use super::condition_selector::select_conditions;
use super::diagnostics::{DiagnosticsSink, SynthesisEvent, TracingSink};
use super::error::SynthesisError;
use super::normalizer::normalize;
use super::numeric::RegexNumericExtractor;
use super::ports::{ConditionScorer, NumericExtractor};
use super::scoring::score_candidates;
use super::synthesizer::render;
use crate::config::SynthesisConfig;
use crate::models::prediction::{Connector, PredictionSet};
use crate::models::query::Query;
use crate::models::schema::{RowSet, TableSchema};

/// 预测结果到 SQL 的合成引擎。不保存跨请求状态，
/// 结果只取决于输入与注入的协作方。
pub struct SynthesisEngine {
    scorer: Arc<dyn ConditionScorer>,
    extractor: Arc<dyn NumericExtractor>,
    sink: Arc<dyn DiagnosticsSink>,
    config: SynthesisConfig,
}

impl SynthesisEngine {
    pub fn new(scorer: Arc<dyn ConditionScorer>, config: SynthesisConfig) -> Self {
        Self {
            scorer,
            extractor: Arc::new(RegexNumericExtractor),
            sink: Arc::new(TracingSink),
            config,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn NumericExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    fn emit(&self, event: impl FnOnce() -> SynthesisEvent) {
        if self.config.diagnostics_enabled {
            self.sink.record(&event());
        }
    }

    /// 唯一入口。超时或被取消时丢弃已收集的分数，不返回部分 SQL。
    #[instrument(skip(self, schema, predictions, rows), fields(question = %question, table = %table_name))]
    pub async fn synthesize(
        &self,
        question: &str,
        schema: &TableSchema,
        predictions: &PredictionSet,
        rows: &RowSet,
        table_name: &str,
    ) -> Result<String, SynthesisError> {
        match tokio::time::timeout(
            self.config.timeout,
            self.run(question, schema, predictions, rows, table_name),
        )
        .await
        {
            Ok(res) => res,
            Err(_) => {
                warn!("合成超时，已丢弃中间结果: {:?}", self.config.timeout);
                Err(SynthesisError::SynthesisAborted(format!(
                    "timed out after {:?}",
                    self.config.timeout
                )))
            }
        }
    }

    async fn run(
        &self,
        question: &str,
        schema: &TableSchema,
        predictions: &PredictionSet,
        rows: &RowSet,
        table_name: &str,
    ) -> Result<String, SynthesisError> {
        let predictions = normalize(predictions, schema)?;
        debug!(
            "预测结果: agg={:?} cond={:?} conn={:?}",
            predictions.aggregation, predictions.condition, predictions.connector
        );

        // A. SELECT 列
        let selection = select_columns(&predictions.aggregation, schema, question);
        if let Some(ratios) = &selection.fallback_ratios {
            info!("没有列被选中，按相似度兜底选择: {}", selection.terms[0].column);
            self.emit(|| SynthesisEvent::FallbackApplied {
                ratios: ratios.clone(),
                chosen: selection.terms[0].column.clone(),
            });
        }
        self.emit(|| SynthesisEvent::ColumnsSelected {
            terms: selection.terms.clone(),
        });

        // B. 候选条件
        let groups = generate_candidates(
            schema,
            &predictions.condition,
            rows,
            question,
            self.extractor.as_ref(),
        );
        for g in &groups {
            if g.candidates.is_empty() {
                debug!("列 {} 预测了条件但没有候选值，跳过", g.column.name);
                self.emit(|| SynthesisEvent::EmptyCandidateSet {
                    column: g.column.name.clone(),
                });
            } else {
                self.emit(|| SynthesisEvent::CandidatesGenerated {
                    column: g.column.name.clone(),
                    literals: g.candidates.iter().map(|c| c.literal.clone()).collect(),
                });
            }
        }

        // C. 打分
        let groups = score_candidates(
            groups,
            question,
            self.scorer.as_ref(),
            self.config.scoring_concurrency,
            self.config.strict_scoring,
        )
        .await?;
        for g in groups.iter().filter(|g| !g.candidates.is_empty()) {
            self.emit(|| SynthesisEvent::CandidatesScored {
                column: g.column.name.clone(),
                scores: g
                    .candidates
                    .iter()
                    .map(|c| (c.literal.clone(), c.score_or_zero()))
                    .collect(),
            });
        }

        // D. 条件筛选与连接词推断
        let conditions = select_conditions(groups, predictions.connector);
        for o in &conditions.overrides {
            debug!("候选分数过低，强制选中: {}={} ({:.4})", o.column, o.literal, o.raw);
            self.emit(|| SynthesisEvent::ScoreOverridden {
                column: o.column.clone(),
                literal: o.literal.clone(),
                raw: o.raw,
            });
        }
        if conditions.connector_forced {
            debug!("多个条件但连接词为空，改为 AND");
            self.emit(|| SynthesisEvent::ConnectorForced {
                from: Connector::None,
                to: Connector::And,
            });
        }

        // E. 拼装
        let query = Query {
            select_terms: selection.terms,
            table_name: table_name.to_string(),
            where_terms: conditions.where_terms,
            connector: conditions.connector,
        };
        let sql = render(&query, self.config.legacy_where_spacing);
        info!("SQL 合成完成: {}", sql);
        self.emit(|| SynthesisEvent::QueryBuilt { sql: sql.clone() });
        Ok(sql)
    }
}
