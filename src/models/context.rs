use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::schema::ColumnKind;

#[derive(Debug, Deserialize)]
pub struct Nl2SqlRequest {
    pub question: String, // 用户提问内容
    pub table_name: String,
    #[serde(default)]
    pub execute: bool,
}

#[derive(Debug, Serialize)]
pub struct Nl2SqlAnswer {
    pub request_id: Uuid,
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct HeaderInfo {
    pub name: String,
    pub kind: ColumnKind,
}
