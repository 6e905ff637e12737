use crate::models::query::{Query, SelectTerm, WhereTerm};

/// 将 Query 渲染为 SQL 文本。标识符用反引号，字面量用双引号，字面量不做转义。
pub fn render(query: &Query, legacy_where_spacing: bool) -> String {
    let select = query
        .select_terms
        .iter()
        .map(select_term)
        .collect::<Vec<_>>()
        .join(" ,");

    let mut sql = format!("SELECT {} FROM `{}`", select, query.table_name);

    if !query.where_terms.is_empty() {
        let keyword = query.connector.keyword();
        let mut clause = String::new();
        for (i, term) in query.where_terms.iter().enumerate() {
            if i > 0 {
                if legacy_where_spacing {
                    // 兼容旧输出: 连接词前没有空格
                    clause.push_str(keyword);
                    clause.push(' ');
                } else if keyword.is_empty() {
                    clause.push(' ');
                } else {
                    clause.push(' ');
                    clause.push_str(keyword);
                    clause.push(' ');
                }
            }
            clause.push_str(&where_term(term));
        }
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }

    sql
}

fn select_term(term: &SelectTerm) -> String {
    match term.agg.sql_function() {
        Some(func) => format!("{}(`{}`)", func, term.column),
        None => format!("(`{}`)", term.column),
    }
}

fn where_term(term: &WhereTerm) -> String {
    format!(
        "`{}` {} \"{}\"",
        term.column,
        term.op.symbol().unwrap_or_default(),
        term.literal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prediction::{AggKind, CondOp, Connector};

    fn query(connector: Connector, wheres: &[(&str, CondOp, &str)]) -> Query {
        Query {
            select_terms: vec![
                SelectTerm { column: "name".into(), agg: AggKind::None },
                SelectTerm { column: "price".into(), agg: AggKind::Avg },
                SelectTerm { column: "id".into(), agg: AggKind::Raw },
            ],
            table_name: "t".into(),
            where_terms: wheres
                .iter()
                .map(|(c, op, l)| WhereTerm {
                    column: c.to_string(),
                    op: *op,
                    literal: l.to_string(),
                })
                .collect(),
            connector,
        }
    }

    #[test]
    fn renders_select_only() {
        assert_eq!(
            render(&query(Connector::None, &[]), false),
            "SELECT (`name`) ,AVG(`price`) ,(`id`) FROM `t`"
        );
    }

    #[test]
    fn renders_where_with_spaced_connector() {
        let q = query(
            Connector::Or,
            &[("a", CondOp::Equal, "x"), ("b", CondOp::NotEqual, "y")],
        );
        assert_eq!(
            render(&q, false),
            "SELECT (`name`) ,AVG(`price`) ,(`id`) FROM `t` WHERE `a` = \"x\" OR `b` != \"y\""
        );
    }

    #[test]
    fn legacy_spacing_is_byte_compatible() {
        let q = query(
            Connector::And,
            &[("a", CondOp::Equal, "x"), ("b", CondOp::LessThan, "3")],
        );
        assert!(render(&q, true).ends_with("WHERE `a` = \"x\"AND `b` < \"3\""));
    }

    #[test]
    fn single_term_omits_connector() {
        let q = query(Connector::And, &[("salary", CondOp::GreaterThan, "50000")]);
        assert!(render(&q, false).ends_with(" WHERE `salary` > \"50000\""));
    }
}
