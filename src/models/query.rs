use serde::Serialize;

use super::prediction::{AggKind, CondOp, Connector};
use super::schema::ColumnMeta;

/// 候选 WHERE 条件 (列, 运算符, 字面量)，打分前 score 为空
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionCandidate {
    pub column: ColumnMeta,
    pub op: CondOp,
    pub literal: String,
    pub score: Option<f64>,
    /// 打分调用失败时为 true, 此类候选不参与低分兜底
    pub scoring_failed: bool,
}

impl ConditionCandidate {
    pub fn new(column: ColumnMeta, op: CondOp, literal: String) -> Self {
        Self {
            column,
            op,
            literal,
            score: None,
            scoring_failed: false,
        }
    }

    /// 打分模型的输入格式: `列名运算符值`，无空格无引号
    pub fn serialized(&self) -> String {
        format!(
            "{}{}{}",
            self.column.name,
            self.op.symbol().unwrap_or_default(),
            self.literal
        )
    }

    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectTerm {
    pub column: String,
    pub agg: AggKind,
}

/// 最终合成的查询结构
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub select_terms: Vec<SelectTerm>,
    pub table_name: String,
    pub where_terms: Vec<WhereTerm>,
    pub connector: Connector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhereTerm {
    pub column: String,
    pub op: CondOp,
    pub literal: String,
}
