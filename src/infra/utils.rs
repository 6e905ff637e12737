use serde_json::{json, Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo};

/// 按列位置读取单元格并转换为 JSON 值
pub fn mysql_cell_to_json(row: &MySqlRow, idx: usize) -> Value {
    let type_name = row.columns()[idx].type_info().name(); // 如 "INT", "DECIMAL", "VARCHAR", "DATE"

    match type_name {
        "TINYINT" | "SMALLINT" | "INT" | "MEDIUMINT" => {
            json!(row.try_get::<Option<i32>, _>(idx).unwrap_or(None))
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "INT UNSIGNED" | "MEDIUMINT UNSIGNED" => {
            json!(row.try_get::<Option<u32>, _>(idx).unwrap_or(None))
        }
        "BOOLEAN" => json!(row.try_get::<Option<bool>, _>(idx).unwrap_or(None)),
        "BIGINT" => json!(row.try_get::<Option<i64>, _>(idx).unwrap_or(None)),
        "BIGINT UNSIGNED" => json!(row.try_get::<Option<u64>, _>(idx).unwrap_or(None)),
        "FLOAT" => json!(row.try_get::<Option<f32>, _>(idx).unwrap_or(None)),
        "DOUBLE" => json!(row.try_get::<Option<f64>, _>(idx).unwrap_or(None)),
        "DECIMAL" | "NEWDECIMAL" => {
            // 金额保持精度，按字符串输出
            let v: Option<rust_decimal::Decimal> = row.try_get(idx).unwrap_or(None);
            json!(v.map(|d| d.to_string()))
        }
        "DATE" => {
            let v: Option<chrono::NaiveDate> = row.try_get(idx).unwrap_or(None);
            json!(v.map(|d| d.to_string()))
        }
        "DATETIME" | "TIMESTAMP" => {
            let v: Option<chrono::NaiveDateTime> = row.try_get(idx).unwrap_or(None);
            json!(v.map(|dt| dt.to_string()))
        }
        "JSON" => row.try_get::<Option<Value>, _>(idx).unwrap_or(None).unwrap_or(Value::Null),
        _ => {
            // 其他类型尝试按字符串读取
            let v: Option<String> = row.try_get(idx).unwrap_or(None);
            json!(v)
        }
    }
}

/// 一行转为按位置排列的单元格
pub fn mysql_row_to_cells(row: &MySqlRow) -> Vec<Value> {
    (0..row.columns().len())
        .map(|idx| mysql_cell_to_json(row, idx))
        .collect()
}

/// 一行转为 {列名: 值} 对象，用于返回查询结果
pub fn mysql_row_to_json(row: &MySqlRow) -> Value {
    let mut map = Map::new();
    for (idx, col) in row.columns().iter().enumerate() {
        map.insert(col.name().to_string(), mysql_cell_to_json(row, idx));
    }
    Value::Object(map)
}
