use std::cmp::Ordering;

use super::candidates::ColumnCandidates;
use crate::models::prediction::Connector;
use crate::models::query::{ConditionCandidate, WhereTerm};

/// 首选候选低于该分数时视为"全部低置信"，强制选中
pub const OVERRIDE_BELOW: f64 = 0.4;
/// 低于该分数的候选被丢弃
pub const DROP_BELOW: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub column: String,
    pub literal: String,
    pub raw: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSelection {
    pub where_terms: Vec<WhereTerm>,
    pub connector: Connector,
    pub overrides: Vec<Override>,
    /// 预测连接词为空但存在多个条件时被改写为 AND
    pub connector_forced: bool,
}

fn rank(a: &ConditionCandidate, b: &ConditionCandidate) -> Ordering {
    b.score_or_zero()
        .total_cmp(&a.score_or_zero())
        .then(a.scoring_failed.cmp(&b.scoring_failed))
}

/// 按 schema 顺序逐列排序、兜底、过滤候选，并推断连接词
pub fn select_conditions(groups: Vec<ColumnCandidates>, predicted: Connector) -> ConditionSelection {
    let mut where_terms = Vec::new();
    let mut overrides = Vec::new();

    for group in groups {
        let mut candidates = group.candidates;
        if candidates.is_empty() {
            continue;
        }
        // 稳定排序，同分保持生成顺序
        candidates.sort_by(rank);

        // 之前的列已经产出条件时不再兜底，低分列自然落选
        let top = &mut candidates[0];
        if where_terms.is_empty() && !top.scoring_failed && top.score_or_zero() < OVERRIDE_BELOW {
            overrides.push(Override {
                column: group.column.name.clone(),
                literal: top.literal.clone(),
                raw: top.score_or_zero(),
            });
            top.score = Some(1.0);
        }

        where_terms.extend(
            candidates
                .into_iter()
                .filter(|c| c.score_or_zero() >= DROP_BELOW)
                .map(|c| WhereTerm {
                    column: c.column.name,
                    op: c.op,
                    literal: c.literal,
                }),
        );
    }

    let connector_forced = where_terms.len() > 1 && predicted == Connector::None;
    let connector = if connector_forced {
        Connector::And
    } else {
        predicted
    };

    ConditionSelection {
        where_terms,
        connector,
        overrides,
        connector_forced,
    }
}
