use thiserror::Error;

/// 返回给调用方的合成失败
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 列数为 0 时同样报告此错误
    #[error("schema has {columns} columns but predictions carry {aggregation} aggregation and {condition} condition labels")]
    SchemaMismatch {
        columns: usize,
        aggregation: usize,
        condition: usize,
    },
    #[error("prediction unavailable: {0}")]
    PredictionUnavailable(String),
    #[error("synthesis aborted: {0}")]
    SynthesisAborted(String),
}

/// 外部协作方 (分类器、打分器、数据库) 的调用失败
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("http transport failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("label index {1} out of range for {0}")]
    InvalidLabel(&'static str, i64),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
