use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use sqlx::{MySqlPool, Row};
use tracing::{debug, info};

use crate::core::error::CollaboratorError;
use crate::core::ports::TableDataProvider;
use crate::infra::utils::{mysql_row_to_cells, mysql_row_to_json};
use crate::models::schema::{ColumnKind, ColumnMeta, RowSet, TableSchema};

/// MySQL 表数据源: 表结构 (带缓存)、整表数据、表清单与 SQL 执行
pub struct MySqlTableSource {
    pool: MySqlPool,
    /// 存放可查询表名的登记表
    registry: String,
    schemas: DashMap<String, TableSchema>,
}

impl MySqlTableSource {
    pub fn new(pool: MySqlPool, registry: impl Into<String>) -> Self {
        Self {
            pool,
            registry: registry.into(),
            schemas: DashMap::new(),
        }
    }
}

/// 反引号标识符，内部反引号加倍
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[async_trait]
impl TableDataProvider for MySqlTableSource {
    async fn schema(&self, table_name: &str) -> Result<TableSchema, CollaboratorError> {
        if let Some(cached) = self.schemas.get(table_name) {
            return Ok(cached.clone());
        }
        let rows = sqlx::query(
            "SELECT CAST(COLUMN_NAME AS CHAR) AS name, CAST(DATA_TYPE AS CHAR) AS data_type \
             FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
             ORDER BY ORDINAL_POSITION",
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for r in rows {
            let name: String = r.try_get("name")?;
            let data_type: String = r.try_get("data_type")?;
            columns.push(ColumnMeta::new(name, ColumnKind::from_sql_type(&data_type)));
        }
        let schema = TableSchema::new(columns);
        if !schema.is_empty() {
            debug!("缓存表结构: {} ({} 列)", table_name, schema.len());
            self.schemas.insert(table_name.to_string(), schema.clone());
        }
        Ok(schema)
    }

    async fn rows(&self, table_name: &str) -> Result<RowSet, CollaboratorError> {
        let schema = self.schema(table_name).await?;
        let cols = schema
            .columns
            .iter()
            .map(|c| quote_ident(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} FROM {}", cols, quote_ident(table_name));
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        debug!("读取表数据: {} 共 {} 行", table_name, rows.len());
        Ok(RowSet::new(rows.iter().map(mysql_row_to_cells).collect()))
    }

    async fn list_tables(&self) -> Result<Vec<String>, CollaboratorError> {
        let sql = format!("SELECT * FROM {}", quote_ident(&self.registry));
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.try_get::<String, _>(0).ok())
            .collect())
    }

    async fn execute(&self, sql: &str) -> Result<Vec<Value>, CollaboratorError> {
        info!("执行合成 SQL: {}", sql);
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(mysql_row_to_json).collect())
    }
}
