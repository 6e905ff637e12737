use serde::{Deserialize, Serialize};

use crate::core::error::CollaboratorError;

/// 聚合函数 (或不聚合)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AggKind {
    /// 该列不是聚合目标
    None,
    /// 被选中但不聚合，输出原始列引用
    Raw,
    Avg,
    Max,
    Min,
    Count,
    Sum,
}

impl AggKind {
    /// 分类器标签: 0=原始列, 1..5=聚合, 6=未选中
    pub fn from_label(idx: i64) -> Result<Self, CollaboratorError> {
        Ok(match idx {
            0 => AggKind::Raw,
            1 => AggKind::Avg,
            2 => AggKind::Max,
            3 => AggKind::Min,
            4 => AggKind::Count,
            5 => AggKind::Sum,
            6 => AggKind::None,
            other => return Err(CollaboratorError::InvalidLabel("agg", other)),
        })
    }

    pub fn is_selected(self) -> bool {
        self != AggKind::None
    }

    /// SQL 聚合函数名; None 与 Raw 没有函数
    pub fn sql_function(self) -> Option<&'static str> {
        match self {
            AggKind::None | AggKind::Raw => None,
            AggKind::Avg => Some("AVG"),
            AggKind::Max => Some("MAX"),
            AggKind::Min => Some("MIN"),
            AggKind::Count => Some("COUNT"),
            AggKind::Sum => Some("SUM"),
        }
    }
}

/// 比较运算符
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CondOp {
    GreaterThan,
    LessThan,
    Equal,
    NotEqual,
    None,
}

impl CondOp {
    pub fn from_label(idx: i64) -> Result<Self, CollaboratorError> {
        Ok(match idx {
            0 => CondOp::GreaterThan,
            1 => CondOp::LessThan,
            2 => CondOp::Equal,
            3 => CondOp::NotEqual,
            4 => CondOp::None,
            other => return Err(CollaboratorError::InvalidLabel("cond", other)),
        })
    }

    pub fn symbol(self) -> Option<&'static str> {
        match self {
            CondOp::GreaterThan => Some(">"),
            CondOp::LessThan => Some("<"),
            CondOp::Equal => Some("="),
            CondOp::NotEqual => Some("!="),
            CondOp::None => None,
        }
    }
}

/// WHERE 条件连接词
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    None,
    And,
    Or,
}

impl Connector {
    pub fn from_label(idx: i64) -> Result<Self, CollaboratorError> {
        Ok(match idx {
            0 => Connector::None,
            1 => Connector::And,
            2 => Connector::Or,
            other => return Err(CollaboratorError::InvalidLabel("conn_op", other)),
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Connector::None => "",
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// 分类器原始输出 (标签下标)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawPrediction {
    pub agg: Vec<i64>,
    pub cond: Vec<i64>,
    pub conn_op: i64,
}

impl RawPrediction {
    /// 在边界处一次性解码为枚举，引擎内部不再接触原始下标
    pub fn decode(&self) -> Result<PredictionSet, CollaboratorError> {
        Ok(PredictionSet {
            aggregation: self
                .agg
                .iter()
                .map(|&i| AggKind::from_label(i))
                .collect::<Result<_, _>>()?,
            condition: self
                .cond
                .iter()
                .map(|&i| CondOp::from_label(i))
                .collect::<Result<_, _>>()?,
            connector: Connector::from_label(self.conn_op)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionSet {
    pub aggregation: Vec<AggKind>,
    pub condition: Vec<CondOp>,
    pub connector: Connector,
}
