use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use nl2sql_backend::config::SynthesisConfig;
use nl2sql_backend::core::diagnostics::{MemorySink, SynthesisEvent};
use nl2sql_backend::core::engine::SynthesisEngine;
use nl2sql_backend::core::error::SynthesisError;
use nl2sql_backend::models::prediction::{AggKind, CondOp, Connector, PredictionSet};
use nl2sql_backend::models::schema::{ColumnKind, RowSet};

mod support;
use support::{engine, schema, stock_rows, stock_schema, FixedNumbers, TableScorer};

fn predictions(agg: Vec<AggKind>, cond: Vec<CondOp>, connector: Connector) -> PredictionSet {
    PredictionSet {
        aggregation: agg,
        condition: cond,
        connector,
    }
}

#[tokio::test]
async fn fallback_selects_only_column_without_conditions() {
    let s = schema(&[("name", ColumnKind::Categorical)]);
    let p = predictions(vec![AggKind::None], vec![CondOp::None], Connector::None);
    let sql = engine(Arc::new(TableScorer::default()), vec![])
        .synthesize("total sales", &s, &p, &RowSet::default(), "t")
        .await
        .unwrap();
    assert_eq!(sql, "SELECT (`name`) FROM `t`");
}

#[tokio::test]
async fn low_scoring_numeric_condition_is_overridden() {
    let s = schema(&[("salary", ColumnKind::Numeric)]);
    let p = predictions(vec![AggKind::None], vec![CondOp::GreaterThan], Connector::None);
    let scorer = Arc::new(TableScorer::new(&[("salary>50000", 0.1)]));
    let sql = engine(scorer, vec!["50000"])
        .synthesize("salary above 50000", &s, &p, &RowSet::default(), "t")
        .await
        .unwrap();
    assert_eq!(sql, "SELECT (`salary`) FROM `t` WHERE `salary` > \"50000\"");
}

#[tokio::test]
async fn override_does_not_reach_a_later_low_column() {
    let s = schema(&[("a", ColumnKind::Categorical), ("b", ColumnKind::Categorical)]);
    let rows = RowSet::new(vec![vec![json!("x"), json!("y")]]);
    let p = predictions(
        vec![AggKind::Raw, AggKind::None],
        vec![CondOp::Equal, CondOp::Equal],
        Connector::None,
    );
    let scorer = Arc::new(TableScorer::new(&[("a=x", 0.9), ("b=y", 0.05)]));
    let sql = engine(scorer, vec![])
        .synthesize("q", &s, &p, &rows, "t")
        .await
        .unwrap();
    assert_eq!(sql, "SELECT (`a`) FROM `t` WHERE `a` = \"x\"");
}

#[tokio::test]
async fn two_surviving_conditions_force_and() {
    let s = schema(&[("a", ColumnKind::Categorical), ("b", ColumnKind::Categorical)]);
    let rows = RowSet::new(vec![vec![json!("x"), json!("y")]]);
    let p = predictions(
        vec![AggKind::Count, AggKind::None],
        vec![CondOp::Equal, CondOp::NotEqual],
        Connector::None,
    );
    let scorer = Arc::new(TableScorer::new(&[("a=x", 0.9), ("b!=y", 0.8)]));
    let sql = engine(scorer, vec![])
        .synthesize("q", &s, &p, &rows, "t")
        .await
        .unwrap();
    assert_eq!(
        sql,
        "SELECT COUNT(`a`) FROM `t` WHERE `a` = \"x\" AND `b` != \"y\""
    );
}

#[tokio::test]
async fn legacy_spacing_reproduces_old_output() {
    let s = schema(&[("a", ColumnKind::Categorical), ("b", ColumnKind::Categorical)]);
    let rows = RowSet::new(vec![vec![json!("x"), json!("y")]]);
    let p = predictions(
        vec![AggKind::Raw, AggKind::None],
        vec![CondOp::Equal, CondOp::Equal],
        Connector::Or,
    );
    let scorer = Arc::new(TableScorer::new(&[("a=x", 0.9), ("b=y", 0.8)]));
    let config = SynthesisConfig {
        legacy_where_spacing: true,
        ..SynthesisConfig::default()
    };
    let sql = SynthesisEngine::new(scorer, config)
        .synthesize("q", &s, &p, &rows, "t")
        .await
        .unwrap();
    assert_eq!(sql, "SELECT (`a`) FROM `t` WHERE `a` = \"x\"OR `b` = \"y\"");
}

#[tokio::test]
async fn stock_question_end_to_end() {
    let p = predictions(
        vec![AggKind::None, AggKind::Raw],
        vec![CondOp::Equal, CondOp::None],
        Connector::Or,
    );
    let scorer = Arc::new(TableScorer::new(&[
        ("股票名称=搜房网", 0.93),
        ("股票名称=人人网", 0.88),
        ("股票名称=長榮", 0.01),
    ]));
    let sql = engine(scorer.clone(), vec![])
        .synthesize(
            "搜房网和人人网的周涨跌幅是多少",
            &stock_schema(),
            &p,
            &stock_rows(),
            "stock",
        )
        .await
        .unwrap();
    assert_eq!(
        sql,
        "SELECT (`周涨跌幅`) FROM `stock` WHERE `股票名称` = \"搜房网\" OR `股票名称` = \"人人网\""
    );
    assert_eq!(scorer.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn output_is_deterministic() {
    let p = predictions(
        vec![AggKind::None, AggKind::None],
        vec![CondOp::Equal, CondOp::GreaterThan],
        Connector::None,
    );
    let scorer = Arc::new(TableScorer::new(&[
        ("股票名称=搜房网", 0.5),
        ("股票名称=人人网", 0.5),
        ("股票名称=長榮", 0.5),
        ("周涨跌幅>5", 0.3),
    ]));
    let engine = engine(scorer, vec!["5"]);
    let mut outputs = Vec::new();
    for _ in 0..5 {
        outputs.push(
            engine
                .synthesize("周涨跌幅大于5", &stock_schema(), &p, &stock_rows(), "stock")
                .await
                .unwrap(),
        );
    }
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    assert!(outputs[0].contains(
        "WHERE `股票名称` = \"搜房网\" AND `股票名称` = \"人人网\" AND `股票名称` = \"長榮\" AND `周涨跌幅` > \"5\""
    ));
}

#[tokio::test]
async fn failed_scores_degrade_to_no_condition() {
    let s = schema(&[("salary", ColumnKind::Numeric)]);
    let p = predictions(vec![AggKind::Max], vec![CondOp::LessThan], Connector::None);
    let sql = engine(Arc::new(TableScorer::default()), vec!["3000"])
        .synthesize("q", &s, &p, &RowSet::default(), "t")
        .await
        .unwrap();
    assert_eq!(sql, "SELECT MAX(`salary`) FROM `t`");
}

#[tokio::test]
async fn strict_scoring_aborts_on_failure() {
    let s = schema(&[("salary", ColumnKind::Numeric)]);
    let p = predictions(vec![AggKind::Max], vec![CondOp::LessThan], Connector::None);
    let config = SynthesisConfig {
        strict_scoring: true,
        ..SynthesisConfig::default()
    };
    let err = SynthesisEngine::new(Arc::new(TableScorer::default()), config)
        .with_extractor(Arc::new(FixedNumbers(vec!["3000"])))
        .synthesize("q", &s, &p, &RowSet::default(), "t")
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::SynthesisAborted(_)));
}

#[tokio::test(start_paused = true)]
async fn timeout_aborts_without_partial_output() {
    let s = schema(&[("salary", ColumnKind::Numeric)]);
    let p = predictions(vec![AggKind::Max], vec![CondOp::LessThan], Connector::None);
    let scorer = Arc::new(TableScorer::new(&[("salary<3000", 0.9)]).with_delay(Duration::from_secs(60)));
    let config = SynthesisConfig {
        timeout: Duration::from_millis(50),
        ..SynthesisConfig::default()
    };
    let err = SynthesisEngine::new(scorer, config)
        .with_extractor(Arc::new(FixedNumbers(vec!["3000"])))
        .synthesize("q", &s, &p, &RowSet::default(), "t")
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::SynthesisAborted(_)));
}

#[tokio::test]
async fn mismatched_predictions_are_rejected() {
    let p = predictions(vec![AggKind::None], vec![CondOp::None, CondOp::None], Connector::None);
    let err = engine(Arc::new(TableScorer::default()), vec![])
        .synthesize("q", &stock_schema(), &p, &stock_rows(), "stock")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SynthesisError::SchemaMismatch {
            columns: 2,
            aggregation: 1,
            condition: 2
        }
    ));
}

#[tokio::test]
async fn empty_schema_never_yields_empty_select() {
    let p = predictions(vec![], vec![], Connector::None);
    let err = engine(Arc::new(TableScorer::default()), vec![])
        .synthesize("q", &schema(&[]), &p, &RowSet::default(), "t")
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::SchemaMismatch { columns: 0, .. }));
}

#[tokio::test]
async fn diagnostics_record_decisions_without_changing_output() {
    let s = schema(&[("a", ColumnKind::Categorical), ("b", ColumnKind::Numeric)]);
    let rows = RowSet::new(vec![vec![json!("x"), json!(1)], vec![json!("z"), json!(2)]]);
    let p = predictions(
        vec![AggKind::None, AggKind::None],
        vec![CondOp::Equal, CondOp::GreaterThan],
        Connector::None,
    );
    let scorer = Arc::new(TableScorer::new(&[("a=x", 0.3), ("a=z", 0.25), ("b>7", 0.9)]));

    let plain = engine(scorer.clone(), vec![])
        .synthesize("b", &s, &p, &rows, "t")
        .await
        .unwrap();

    let sink = Arc::new(MemorySink::new());
    let config = SynthesisConfig {
        diagnostics_enabled: true,
        ..SynthesisConfig::default()
    };
    let traced = SynthesisEngine::new(scorer, config)
        .with_extractor(Arc::new(FixedNumbers(vec![])))
        .with_sink(sink.clone())
        .synthesize("b", &s, &p, &rows, "t")
        .await
        .unwrap();

    assert_eq!(plain, traced);
    assert_eq!(traced, "SELECT (`b`) FROM `t` WHERE `a` = \"x\" AND `a` = \"z\"");

    let events = sink.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SynthesisEvent::FallbackApplied { chosen, .. } if chosen == "b")));
    assert!(events
        .iter()
        .any(|e| matches!(e, SynthesisEvent::EmptyCandidateSet { column } if column == "b")));
    assert!(events.contains(&SynthesisEvent::ScoreOverridden {
        column: "a".into(),
        literal: "x".into(),
        raw: 0.3,
    }));
    assert!(events.contains(&SynthesisEvent::ConnectorForced {
        from: Connector::None,
        to: Connector::And,
    }));
    assert!(matches!(events.last(), Some(SynthesisEvent::QueryBuilt { sql }) if *sql == traced));
}
