use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

impl ColumnKind {
    /// 根据数据库原生类型名推断列类别，未知类型按文本处理
    pub fn from_sql_type(type_name: &str) -> Self {
        let t = type_name.to_lowercase();
        let base = t.split(['(', ' ']).next().unwrap_or_default();
        match base {
            "float" | "double" | "decimal" | "numeric" | "real" | "int" | "integer" | "tinyint"
            | "smallint" | "mediumint" | "bigint" => ColumnKind::Numeric,
            _ => ColumnKind::Categorical,
        }
    }

    /// 分类器接口使用的类型标记
    pub fn wire_name(self) -> &'static str {
        match self {
            ColumnKind::Categorical => "text",
            ColumnKind::Numeric => "real",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// 列顺序即预测数组的位置对齐顺序
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TableSchema {
    pub columns: Vec<ColumnMeta>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 分类器请求体中的 headers: [[列名...], [类型...]]
    pub fn headers(&self) -> [Vec<String>; 2] {
        [
            self.columns.iter().map(|c| c.name.clone()).collect(),
            self.columns
                .iter()
                .map(|c| c.kind.wire_name().to_string())
                .collect(),
        ]
    }
}

/// 表数据，每行按 schema 位置对齐
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RowSet {
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self { rows }
    }

    /// 某列的所有非空单元格文本
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(idx))
            .filter_map(cell_text)
    }
}

fn cell_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
