//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文本生成配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 语音识别配置
    #[serde(default)]
    pub stt: SttConfig,

    /// 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// GIF 检索配置
    #[serde(default)]
    pub gif: GifConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节），主要限制录音上传
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（页面与 favicon）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_size() -> usize {
    25 * 1024 * 1024 // 25 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

/// 文本生成配置（OpenAI 兼容接口，默认 Groq）
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 最大输出 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// 瞬时错误最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 首次重试等待（毫秒）
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default)]
    pub api_key: String,
}

fn default_llm_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_max_tokens() -> u32 {
    250
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_groq_base_url(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout(),
            max_retries: 0,
            retry_base_delay_ms: default_retry_base_delay_ms(),
            api_key: String::new(),
        }
    }
}

/// 语音识别配置
#[derive(Debug, Clone, Deserialize)]
pub struct SttConfig {
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,

    #[serde(default = "default_stt_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_stt_timeout")]
    pub timeout_secs: u64,

    /// 未设置时复用 llm.api_key
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_stt_model() -> String {
    "whisper-large-v3".to_string()
}

fn default_stt_timeout() -> u64 {
    120
}

impl SttConfig {
    /// 实际使用的凭据：未设置或为空白时回落到文本生成凭据
    pub fn effective_api_key<'a>(&'a self, llm_api_key: &'a str) -> &'a str {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(llm_api_key)
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            base_url: default_groq_base_url(),
            model: default_stt_model(),
            timeout_secs: default_stt_timeout(),
            api_key: None,
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_tts_url")]
    pub base_url: String,

    /// 固定音色
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// 合成模型
    #[serde(default = "default_tts_model")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub api_key: String,
}

fn default_tts_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_voice_id() -> String {
    "Xb7hH8MSUJpSbSDYk0k2".to_string()
}

fn default_tts_model() -> String {
    "eleven_turbo_v2_5".to_string()
}

fn default_tts_timeout() -> u64 {
    60
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_url(),
            voice_id: default_voice_id(),
            model_id: default_tts_model(),
            timeout_secs: default_tts_timeout(),
            api_key: String::new(),
        }
    }
}

/// GIF 检索配置
#[derive(Debug, Clone, Deserialize)]
pub struct GifConfig {
    #[serde(default = "default_gif_url")]
    pub base_url: String,

    /// 候选数量
    #[serde(default = "default_gif_limit")]
    pub limit: u32,

    /// 内容分级
    #[serde(default = "default_gif_rating")]
    pub rating: String,

    /// 检索失败或无结果时返回的 GIF
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_gif_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub api_key: String,
}

fn default_gif_url() -> String {
    "https://api.giphy.com/v1".to_string()
}

fn default_gif_limit() -> u32 {
    10
}

fn default_gif_rating() -> String {
    "g".to_string()
}

fn default_fallback_url() -> String {
    crate::application::services::DEFAULT_FALLBACK_GIF_URL.to_string()
}

fn default_gif_timeout() -> u64 {
    10
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            base_url: default_gif_url(),
            limit: default_gif_limit(),
            rating: default_gif_rating(),
            fallback_url: default_fallback_url(),
            timeout_secs: default_gif_timeout(),
            api_key: String::new(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 转写/合成临时文件目录
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
}

fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.model, "llama3-70b-8192");
        assert_eq!(config.llm.temperature, 1.0);
        assert_eq!(config.llm.max_tokens, 250);
        assert_eq!(config.tts.voice_id, "Xb7hH8MSUJpSbSDYk0k2");
        assert_eq!(config.tts.model_id, "eleven_turbo_v2_5");
        assert_eq!(config.gif.limit, 10);
        assert_eq!(config.gif.rating, "g");
        assert!(config.stt.api_key.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_stt_key_falls_back_to_llm_key() {
        let mut stt = SttConfig::default();
        assert_eq!(stt.effective_api_key("gsk"), "gsk");

        stt.api_key = Some(String::new());
        assert_eq!(stt.effective_api_key("gsk"), "gsk");

        stt.api_key = Some("  ".to_string());
        assert_eq!(stt.effective_api_key("gsk"), "gsk");

        stt.api_key = Some("whisper_key".to_string());
        assert_eq!(stt.effective_api_key("gsk"), "whisper_key");
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let config: GifConfig = serde_json::from_str(r#"{"api_key":"k","rating":"pg"}"#).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.rating, "pg");
        assert_eq!(config.limit, 10);
    }
}
