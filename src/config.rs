use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// 合成引擎自身的配置，不依赖环境变量
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// 输出中间决策的结构化诊断事件，不影响返回的 SQL
    pub diagnostics_enabled: bool,
    /// 打分调用失败时中止合成，而不是按 0 分处理
    pub strict_scoring: bool,
    pub timeout: Duration,
    pub scoring_concurrency: usize,
    /// 复现旧版输出中连接词前缺少空格的写法
    pub legacy_where_spacing: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            diagnostics_enabled: false,
            strict_scoring: false,
            timeout: Duration::from_secs(30),
            scoring_concurrency: 16,
            legacy_where_spacing: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub classifier_url: String,
    pub scorer_url: String,
    pub table_registry: String,
    pub model_http_timeout: Duration,
    pub synthesis: SynthesisConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = SynthesisConfig::default();
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000")
                .parse()
                .context("BIND_ADDR is not a socket address")?,
            classifier_url: env::var("CLASSIFIER_URL").context("CLASSIFIER_URL must be set")?,
            scorer_url: env::var("SCORER_URL").context("SCORER_URL must be set")?,
            table_registry: env_or("TABLE_REGISTRY", "namemap"),
            model_http_timeout: Duration::from_millis(parse_env("MODEL_HTTP_TIMEOUT_MS", 10_000)?),
            synthesis: SynthesisConfig {
                diagnostics_enabled: parse_env("SYNTH_DIAGNOSTICS", defaults.diagnostics_enabled)?,
                strict_scoring: parse_env("SYNTH_STRICT_SCORING", defaults.strict_scoring)?,
                timeout: Duration::from_millis(parse_env(
                    "SYNTH_TIMEOUT_MS",
                    defaults.timeout.as_millis() as u64,
                )?),
                scoring_concurrency: parse_env("SYNTH_SCORING_CONCURRENCY", defaults.scoring_concurrency)?,
                legacy_where_spacing: parse_env(
                    "SYNTH_LEGACY_WHERE_SPACING",
                    defaults.legacy_where_spacing,
                )?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {v}")),
        Err(_) => Ok(default),
    }
}
