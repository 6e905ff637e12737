use super::error::SynthesisError;
use crate::models::prediction::PredictionSet;
use crate::models::schema::TableSchema;

/// 校验预测数组与表结构逐列对齐; 没有列的表无法产出 SELECT 子句
pub fn normalize<'a>(
    predictions: &'a PredictionSet,
    schema: &TableSchema,
) -> Result<&'a PredictionSet, SynthesisError> {
    let columns = schema.len();
    let aggregation = predictions.aggregation.len();
    let condition = predictions.condition.len();
    if columns == 0 || aggregation != columns || condition != columns {
        return Err(SynthesisError::SchemaMismatch {
            columns,
            aggregation,
            condition,
        });
    }
    Ok(predictions)
}
