use std::collections::HashSet;

use super::ports::NumericExtractor;
use crate::models::prediction::CondOp;
use crate::models::query::ConditionCandidate;
use crate::models::schema::{ColumnKind, ColumnMeta, RowSet, TableSchema};

/// 某一列的候选条件，按生成顺序排列
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCandidates {
    pub column: ColumnMeta,
    pub candidates: Vec<ConditionCandidate>,
}

/// 为每个预测了运算符的列生成去重后的候选字面量。
/// 文本列取表中出现过的值，数值列取问题中抽取的数字。
pub fn generate_candidates(
    schema: &TableSchema,
    condition: &[CondOp],
    rows: &RowSet,
    question: &str,
    extractor: &dyn NumericExtractor,
) -> Vec<ColumnCandidates> {
    let mut numbers: Option<Vec<String>> = None;

    schema
        .columns
        .iter()
        .zip(condition)
        .enumerate()
        .filter(|(_, (_, op))| **op != CondOp::None)
        .map(|(idx, (col, &op))| {
            let literals = match col.kind {
                ColumnKind::Categorical => dedup_ordered(rows.column_values(idx)),
                ColumnKind::Numeric => numbers
                    .get_or_insert_with(|| dedup_ordered(extractor.extract(question)))
                    .clone(),
            };
            ColumnCandidates {
                column: col.clone(),
                candidates: literals
                    .into_iter()
                    .map(|lit| ConditionCandidate::new(col.clone(), op, lit))
                    .collect(),
            }
        })
        .collect()
}

/// 保留首次出现顺序的去重
pub fn dedup_ordered<I: IntoIterator<Item = String>>(values: I) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
