use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use nl2sql_backend::api::{router, AppState};
use nl2sql_backend::config::AppConfig;
use nl2sql_backend::core::engine::SynthesisEngine;
use nl2sql_backend::infra::db_external::MySqlTableSource;
use nl2sql_backend::infra::db_internal::init_db;
use nl2sql_backend::infra::model_client::{HttpConditionScorer, HttpPredictionProvider};
use nl2sql_backend::service::Nl2SqlService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let db = init_db(&config.database_url).await?;

    let scorer = Arc::new(HttpConditionScorer::new(&config.scorer_url, config.model_http_timeout)?);
    let predictor = Arc::new(HttpPredictionProvider::new(
        &config.classifier_url,
        config.model_http_timeout,
    )?);
    let tables = Arc::new(MySqlTableSource::new(db, config.table_registry.clone()));

    let engine = SynthesisEngine::new(scorer, config.synthesis.clone());
    let state = Arc::new(AppState {
        service: Nl2SqlService::new(engine, predictor, tables),
    });

    let app = router(state);

    println!("🚀 NL2SQL Backend 运行在 http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
