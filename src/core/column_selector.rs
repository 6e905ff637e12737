use super::similarity::sequence_ratio;
use crate::models::prediction::AggKind;
use crate::models::query::SelectTerm;
use crate::models::schema::TableSchema;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSelection {
    pub terms: Vec<SelectTerm>,
    /// 触发兜底时每列与问题的相似度
    pub fallback_ratios: Option<Vec<f64>>,
}

/// 决定 SELECT 列。全部列都未被选中时，按问题与列名的相似度选出一列，
/// 保证 SELECT 子句非空。
pub fn select_columns(aggregation: &[AggKind], schema: &TableSchema, question: &str) -> ColumnSelection {
    let terms: Vec<SelectTerm> = schema
        .columns
        .iter()
        .zip(aggregation)
        .filter(|(_, agg)| agg.is_selected())
        .map(|(col, &agg)| SelectTerm {
            column: col.name.clone(),
            agg,
        })
        .collect();

    if !terms.is_empty() || schema.is_empty() {
        return ColumnSelection {
            terms,
            fallback_ratios: None,
        };
    }

    let ratios: Vec<f64> = schema
        .columns
        .iter()
        .map(|c| sequence_ratio(question, &c.name))
        .collect();

    // 并列时取第一个
    let mut best = 0;
    for (i, &r) in ratios.iter().enumerate() {
        if r > ratios[best] {
            best = i;
        }
    }

    ColumnSelection {
        terms: vec![SelectTerm {
            column: schema.columns[best].name.clone(),
            agg: AggKind::None,
        }],
        fallback_ratios: Some(ratios),
    }
}
