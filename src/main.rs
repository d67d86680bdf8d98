//! Solace - 情绪支持回复服务
//!
//! 启动流程: 加载配置 → 初始化日志 → 创建外部能力客户端 → 启动 HTTP 服务

use std::sync::Arc;
use std::time::Duration;

use solace::application::services::{GenerationSettings, ImageFetcherSettings, SynthesisSettings};
use solace::config::{load_config, print_config, AppConfig};
use solace::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, GiphyClient, GiphyClientConfig, GroqClient,
    GroqClientConfig, WhisperClient, WhisperClientConfig,
};
use solace::infrastructure::http::{
    AppState, Capabilities, HttpServer, PipelineSettings, ServerConfig,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},solace={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_capabilities(config: &AppConfig) -> anyhow::Result<Capabilities> {
    let text_generator = GroqClient::new(GroqClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        timeout_secs: config.llm.timeout_secs,
    })?;

    // 语音识别默认复用文本生成的凭据
    let speech_recognizer = WhisperClient::new(WhisperClientConfig {
        base_url: config.stt.base_url.clone(),
        api_key: config.stt.effective_api_key(&config.llm.api_key).to_string(),
        model: config.stt.model.clone(),
        timeout_secs: config.stt.timeout_secs,
    })?;

    let voice_synthesizer = ElevenLabsClient::new(ElevenLabsClientConfig {
        base_url: config.tts.base_url.clone(),
        api_key: config.tts.api_key.clone(),
        timeout_secs: config.tts.timeout_secs,
    })?;

    let image_search = GiphyClient::new(GiphyClientConfig {
        base_url: config.gif.base_url.clone(),
        api_key: config.gif.api_key.clone(),
        timeout_secs: config.gif.timeout_secs,
    })?;

    Ok(Capabilities {
        speech_recognizer: Arc::new(speech_recognizer),
        text_generator: Arc::new(text_generator),
        voice_synthesizer: Arc::new(voice_synthesizer),
        image_search: Arc::new(image_search),
    })
}

fn pipeline_settings(config: &AppConfig) -> PipelineSettings {
    PipelineSettings {
        generation: GenerationSettings {
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            max_retries: config.llm.max_retries,
            retry_base_delay: Duration::from_millis(config.llm.retry_base_delay_ms),
        },
        image: ImageFetcherSettings {
            limit: config.gif.limit,
            rating: config.gif.rating.clone(),
            fallback_url: config.gif.fallback_url.clone(),
        },
        synthesis: SynthesisSettings {
            voice_id: config.tts.voice_id.clone(),
            model_id: config.tts.model_id.clone(),
            scratch_dir: config.storage.scratch_dir.clone(),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值），缺少凭据时直接退出
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Solace - 情绪支持回复服务");
    print_config(&config);

    // 确保临时文件目录存在
    tokio::fs::create_dir_all(&config.storage.scratch_dir).await?;

    let state = AppState::new(build_capabilities(&config)?, pipeline_settings(&config));

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_size(config.server.max_upload_size);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
