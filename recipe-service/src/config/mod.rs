use service_core::config as core_config;
use service_core::error::AppError;
use service_core::retry::BackoffConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_RECIPE_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";
const DEFAULT_GROCERY_MODEL_ID: &str = "amazon.titan-text-express-v1";

#[derive(Debug, Clone)]
pub struct RecipeServiceConfig {
    pub common: core_config::Config,
    pub bedrock: BedrockConfig,
    pub retry: RetrySettings,
}

#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub region: String,
    /// Named AWS credentials profile; the default chain is used when unset.
    pub profile: Option<String>,
    /// Model for recipe generation.
    pub recipe_model_id: String,
    /// Model for grocery-list generation.
    pub grocery_model_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let defaults = BackoffConfig::default();
        Self {
            max_retries: defaults.max_retries,
            base_delay_ms: defaults.base_delay.as_millis() as u64,
            timeout_secs: defaults.timeout_limit.as_secs(),
        }
    }
}

impl RetrySettings {
    pub fn backoff(&self) -> BackoffConfig {
        BackoffConfig {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            timeout_limit: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl RecipeServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";
        let retry_defaults = RetrySettings::default();

        Ok(RecipeServiceConfig {
            common: common_config,
            bedrock: BedrockConfig {
                region: get_env("AWS_REGION", Some(DEFAULT_REGION), is_prod)?,
                profile: env::var("AWS_PROFILE").ok().filter(|p| !p.is_empty()),
                recipe_model_id: get_env("RECIPE_MODEL_ID", Some(DEFAULT_RECIPE_MODEL_ID), is_prod)?,
                grocery_model_id: get_env(
                    "GROCERY_MODEL_ID",
                    Some(DEFAULT_GROCERY_MODEL_ID),
                    is_prod,
                )?,
            },
            retry: RetrySettings {
                max_retries: get_parsed_env("MODEL_MAX_RETRIES", retry_defaults.max_retries)?,
                base_delay_ms: get_parsed_env("MODEL_BASE_DELAY_MS", retry_defaults.base_delay_ms)?,
                timeout_secs: get_parsed_env(
                    "MODEL_RETRY_TIMEOUT_SECS",
                    retry_defaults.timeout_secs,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn get_parsed_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}
