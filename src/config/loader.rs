//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 常用的凭据环境变量名
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
pub const ELEVEN_API_KEY_VAR: &str = "ELEVEN_API_KEY";
pub const GIPHY_API_KEY_VAR: &str = "GIPHY_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SOLACE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// 凭据未通过以上途径设置时，再读取 `GROQ_API_KEY`、`ELEVEN_API_KEY`、`GIPHY_API_KEY`。
///
/// # 环境变量示例
/// - `SOLACE_SERVER__PORT=8080`
/// - `SOLACE_LLM__API_KEY=gsk_...`
/// - `SOLACE_GIF__RATING=pg`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: SOLACE_TTS__VOICE_ID=abc
    builder = builder.add_source(
        Environment::with_prefix("SOLACE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    // 缺省字段由 serde(default) 补齐
    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_conventional_keys(&mut app_config, |name| std::env::var(name).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 用常用环境变量补齐未设置的凭据
fn apply_conventional_keys<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let fill = |slot: &mut String, var: &str| {
        if slot.is_empty() {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    };

    fill(&mut config.llm.api_key, GROQ_API_KEY_VAR);
    fill(&mut config.tts.api_key, ELEVEN_API_KEY_VAR);
    fill(&mut config.gif.api_key, GIPHY_API_KEY_VAR);
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 三个凭据必须在启动时就位
    let credentials = [
        (&config.llm.api_key, "text-generation API key (SOLACE_LLM__API_KEY or GROQ_API_KEY)"),
        (&config.tts.api_key, "voice-synthesis API key (SOLACE_TTS__API_KEY or ELEVEN_API_KEY)"),
        (&config.gif.api_key, "image-search API key (SOLACE_GIF__API_KEY or GIPHY_API_KEY)"),
    ];
    for (key, name) in credentials {
        if key.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!("Missing {}", name)));
        }
    }

    let urls = [
        (&config.llm.base_url, "LLM base URL"),
        (&config.stt.base_url, "STT base URL"),
        (&config.tts.base_url, "TTS base URL"),
        (&config.gif.base_url, "GIF base URL"),
        (&config.gif.fallback_url, "GIF fallback URL"),
    ];
    for (url, name) in urls {
        if url.is_empty() {
            return Err(ConfigError::ValidationError(format!("{} cannot be empty", name)));
        }
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "LLM temperature must be within 0.0..=2.0, got {}",
            config.llm.temperature
        )));
    }

    if config.llm.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "LLM max_tokens cannot be 0".to_string(),
        ));
    }

    if config.gif.limit == 0 {
        return Err(ConfigError::ValidationError(
            "GIF limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// 打印配置信息（用于启动时日志，凭据脱敏）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    tracing::info!("LLM: {} ({})", config.llm.model, config.llm.base_url);
    tracing::info!(
        "LLM Sampling: temperature={}, max_tokens={}, retries={}",
        config.llm.temperature,
        config.llm.max_tokens,
        config.llm.max_retries
    );
    tracing::info!("LLM API Key: {}", redact(&config.llm.api_key));
    tracing::info!("STT: {} ({})", config.stt.model, config.stt.base_url);
    tracing::info!("TTS: voice={}, model={}", config.tts.voice_id, config.tts.model_id);
    tracing::info!("TTS API Key: {}", redact(&config.tts.api_key));
    tracing::info!("GIF: limit={}, rating={}", config.gif.limit, config.gif.rating);
    tracing::info!("GIF API Key: {}", redact(&config.gif.api_key));
    tracing::info!("Scratch Directory: {:?}", config.storage.scratch_dir);
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key = "gsk_test".to_string();
        config.tts.api_key = "xi_test".to_string();
        config.gif.api_key = "giphy_test".to_string();
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&config_with_keys()).is_ok());
    }

    #[test]
    fn test_default_config_fails_fast_without_credentials() {
        let err = validate_config(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("text-generation API key"));
    }

    #[test]
    fn test_each_missing_credential_is_named() {
        let mut config = config_with_keys();
        config.tts.api_key = String::new();
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("voice-synthesis"));

        let mut config = config_with_keys();
        config.gif.api_key = "   ".to_string();
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("image-search"));
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = config_with_keys();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_sampling() {
        let mut config = config_with_keys();
        config.llm.temperature = 3.5;
        assert!(validate_config(&config).is_err());

        let mut config = config_with_keys();
        config.llm.max_tokens = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_gif_limit() {
        let mut config = config_with_keys();
        config.gif.limit = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_conventional_keys_fill_missing_credentials() {
        let mut config = AppConfig::default();
        apply_conventional_keys(&mut config, |name| match name {
            GROQ_API_KEY_VAR => Some("gsk".to_string()),
            ELEVEN_API_KEY_VAR => Some("xi".to_string()),
            GIPHY_API_KEY_VAR => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.llm.api_key, "gsk");
        assert_eq!(config.tts.api_key, "xi");
        assert_eq!(config.gif.api_key, "");
    }

    #[test]
    fn test_conventional_keys_do_not_override_explicit_ones() {
        let mut config = config_with_keys();
        apply_conventional_keys(&mut config, |_| Some("other".to_string()));
        assert_eq!(config.llm.api_key, "gsk_test");
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact(""), "<unset>");
        assert_eq!(redact("secret"), "<redacted>");
    }
}
