//! Synthesize Command Handlers
//!
//! 分块 → 逐块合成（限流重试）→ 按序拼接 → 编码

use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::synthesize_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{SynthesisRequest, TtsEnginePort};
use crate::application::retry::RetryPolicy;
use crate::domain::{
    concat_segments, encode_base64, resolve_voice, split_into_chunks, ChunkConfig,
    AUDIO_CONTENT_TYPE, DEFAULT_VOICE_KEY,
};

/// 默认片段间隔
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(500);

/// 合成流程配置
#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    /// 分块配置
    pub chunk: ChunkConfig,
    /// 限流重试策略
    pub retry: RetryPolicy,
    /// 相邻片段请求之间的固定间隔（与重试退避无关）
    pub pacing_delay: Duration,
    /// 请求未指定音色时使用的音色名称
    pub default_voice: String,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            chunk: ChunkConfig::default(),
            retry: RetryPolicy::default(),
            pacing_delay: DEFAULT_PACING_DELAY,
            default_voice: DEFAULT_VOICE_KEY.to_string(),
        }
    }
}

/// SynthesizeSpeech Handler - 长文本语音合成
pub struct SynthesizeSpeechHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    settings: SynthesisSettings,
}

impl SynthesizeSpeechHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, settings: SynthesisSettings) -> Self {
        Self {
            tts_engine,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: SynthesizeSpeechCommand,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        if !self.tts_engine.is_configured() {
            return Err(ApplicationError::configuration(
                "TTS provider credential is not configured",
            ));
        }

        let text = cmd.text.unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ApplicationError::input("Text is required"));
        }

        let voice_key = cmd
            .voice
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_voice.clone());
        let voice = resolve_voice(&voice_key);
        if !voice.known {
            tracing::warn!(
                voice = %voice.key,
                "Unknown voice key, passing through as provider voice id"
            );
        }

        let text_length = text.chars().count();
        let chunks = split_into_chunks(&text, &self.settings.chunk);

        tracing::info!(
            text_length,
            chunks = chunks.len(),
            max_chunk_chars = self.settings.chunk.max_chars,
            voice = %voice.key,
            voice_id = %voice.provider_id,
            "Starting speech synthesis"
        );

        let mut segments = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 && !self.settings.pacing_delay.is_zero() {
                tokio::time::sleep(self.settings.pacing_delay).await;
            }
            let audio = self
                .synthesize_chunk(index, chunk, &voice.provider_id)
                .await?;
            segments.push(audio);
        }

        let combined = concat_segments(segments);
        let audio_bytes = combined.len();
        let audio_content = encode_base64(&combined);

        tracing::info!(
            chunks = chunks.len(),
            audio_bytes,
            "Speech synthesis completed"
        );

        Ok(SynthesizeSpeechResponse {
            audio_content,
            content_type: AUDIO_CONTENT_TYPE,
            text_length,
            voice: voice.key,
            chunks: chunks.len(),
            audio_bytes,
        })
    }

    /// 合成单个片段，限流时按指数退避重试
    async fn synthesize_chunk(
        &self,
        index: usize,
        text: &str,
        voice_id: &str,
    ) -> Result<Vec<u8>, ApplicationError> {
        let retry = &self.settings.retry;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let request = SynthesisRequest {
                text: text.to_string(),
                voice_id: voice_id.to_string(),
            };

            match self.tts_engine.synthesize(request).await {
                Ok(response) => {
                    tracing::debug!(
                        chunk = index,
                        attempt,
                        request_id = ?response.request_id,
                        audio_size = response.audio_data.len(),
                        "Chunk synthesized"
                    );
                    return Ok(response.audio_data);
                }
                Err(e) if e.is_throttled() => {
                    if !retry.should_retry(attempt) {
                        tracing::error!(
                            chunk = index,
                            attempts = attempt,
                            "Rate limit persisted, giving up"
                        );
                        return Err(ApplicationError::RateLimitExceeded { attempts: attempt });
                    }
                    let delay = retry.backoff_delay(attempt);
                    tracing::warn!(
                        chunk = index,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(chunk = index, attempt, error = %e, "Chunk synthesis failed");
                    return Err(e.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{SynthesisResponse, TtsError};
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Instant;

    /// 按脚本返回结果的 TTS 引擎；脚本耗尽后返回与文本等长的音频
    struct ScriptedEngine {
        configured: bool,
        script: Mutex<VecDeque<Result<Vec<u8>, TtsError>>>,
        calls: Mutex<Vec<(Instant, SynthesisRequest)>>,
    }

    impl ScriptedEngine {
        fn new(script: Vec<Result<Vec<u8>, TtsError>>) -> Self {
            Self {
                configured: true,
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(Vec::new())
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }
    }

    #[async_trait]
    impl TtsEnginePort for ScriptedEngine {
        async fn synthesize(
            &self,
            request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            let fallback = vec![b'a'; request.text.len()];
            self.calls
                .lock()
                .unwrap()
                .push((Instant::now(), request));
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or(Ok(fallback)).map(|audio_data| SynthesisResponse {
                request_id: None,
                audio_data,
            })
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn settings(max_chars: usize, max_attempts: u32, base_delay_ms: u64) -> SynthesisSettings {
        SynthesisSettings {
            chunk: ChunkConfig::new(max_chars),
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(base_delay_ms)),
            pacing_delay: Duration::ZERO,
            default_voice: DEFAULT_VOICE_KEY.to_string(),
        }
    }

    fn command(text: &str) -> SynthesizeSpeechCommand {
        SynthesizeSpeechCommand {
            text: Some(text.to_string()),
            voice: None,
        }
    }

    #[tokio::test]
    async fn test_short_text_single_call() {
        let engine = Arc::new(ScriptedEngine::new(vec![Ok(vec![1, 2, 3])]));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 1));

        let result = handler.handle(command("Hello world.")).await.unwrap();

        assert_eq!(result.chunks, 1);
        assert_eq!(engine.call_count(), 1);
        assert_eq!(result.audio_content, BASE64.encode([1, 2, 3]));
        assert_eq!(result.content_type, "audio/mpeg");
        assert_eq!(result.text_length, 12);
        assert_eq!(result.voice, DEFAULT_VOICE_KEY);
    }

    #[tokio::test]
    async fn test_long_text_reassembled_in_order() {
        let text = "y".repeat(25_000);
        let engine = Arc::new(ScriptedEngine::new(vec![
            Ok(vec![1; 1000]),
            Ok(vec![2; 2000]),
            Ok(vec![3; 3000]),
        ]));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(9_500, 3, 1));

        let result = handler.handle(command(&text)).await.unwrap();

        assert_eq!(result.chunks, 3);
        assert_eq!(result.audio_bytes, 6000);
        let decoded = BASE64.decode(&result.audio_content).unwrap();
        let mut expected = vec![1u8; 1000];
        expected.extend(vec![2u8; 2000]);
        expected.extend(vec![3u8; 3000]);
        assert_eq!(decoded, expected);
    }

    #[tokio::test]
    async fn test_chunks_sent_in_reading_order() {
        let text = "First sentence here. Second sentence here. Third sentence here.";
        let engine = Arc::new(ScriptedEngine::new(Vec::new()));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(25, 3, 1));

        handler.handle(command(text)).await.unwrap();

        let texts: Vec<String> = engine
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.text.clone())
            .collect();
        assert_eq!(
            texts,
            vec![
                "First sentence here.",
                "Second sentence here.",
                "Third sentence here."
            ]
        );
    }

    #[tokio::test]
    async fn test_throttled_once_then_succeeds() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            Err(TtsError::RateLimited),
            Ok(vec![9; 10]),
        ]));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 30));

        let result = handler.handle(command("Selah.")).await.unwrap();

        assert_eq!(result.audio_bytes, 10);
        assert_eq!(engine.call_count(), 2);
        let times = engine.call_times();
        assert!(times[1].duration_since(times[0]) >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_throttled_every_attempt_fails() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            Err(TtsError::RateLimited),
            Err(TtsError::RateLimited),
            Err(TtsError::RateLimited),
            Err(TtsError::RateLimited),
        ]));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 1));

        let err = handler.handle(command("Selah.")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::RateLimitExceeded { attempts: 3 }));
        assert_eq!(engine.call_count(), 3);
    }

    #[tokio::test]
    async fn test_provider_error_not_retried() {
        let engine = Arc::new(ScriptedEngine::new(vec![Err(TtsError::ServiceError {
            status: 400,
            message: "bad voice".to_string(),
        })]));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 1));

        let err = handler.handle(command("Selah.")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ProviderError(_)));
        assert_eq!(engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_mid_pipeline_aborts() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            Ok(vec![1; 4]),
            Err(TtsError::NetworkError("reset".to_string())),
        ]));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(10, 3, 1));

        let err = handler
            .handle(command("aaaaaaaaaa bbbbbbbbbb cccccccccc"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ProviderError(_)));
        assert_eq!(engine.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_any_call() {
        let engine = Arc::new(ScriptedEngine::new(Vec::new()));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 1));

        for cmd in [
            command(""),
            command("   \n"),
            SynthesizeSpeechCommand { text: None, voice: None },
        ] {
            let err = handler.handle(cmd).await.unwrap_err();
            assert!(matches!(err, ApplicationError::InputError(_)));
        }
        assert_eq!(engine.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let engine = Arc::new(ScriptedEngine::unconfigured());
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 1));

        let err = handler.handle(command("Selah.")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ConfigurationError(_)));
        assert_eq!(engine.call_count(), 0);
    }

    #[tokio::test]
    async fn test_voice_lookup_and_passthrough() {
        let engine = Arc::new(ScriptedEngine::new(Vec::new()));
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings(100, 3, 1));

        let known = handler
            .handle(SynthesizeSpeechCommand {
                text: Some("Selah.".to_string()),
                voice: Some("Aria".to_string()),
            })
            .await
            .unwrap();
        let raw = handler
            .handle(SynthesizeSpeechCommand {
                text: Some("Selah.".to_string()),
                voice: Some("customVoiceId123".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(known.voice, "Aria");
        assert_eq!(raw.voice, "customVoiceId123");
        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls[0].1.voice_id, "9BWtsMINqrJLrRacOk9x");
        assert_eq!(calls[1].1.voice_id, "customVoiceId123");
    }

    #[tokio::test]
    async fn test_pacing_delay_between_chunks() {
        let engine = Arc::new(ScriptedEngine::new(Vec::new()));
        let mut settings = settings(10, 3, 1);
        settings.pacing_delay = Duration::from_millis(25);
        let handler = SynthesizeSpeechHandler::new(engine.clone(), settings);

        handler.handle(command("aaaaaaaaaa bbbbbbbbbb")).await.unwrap();

        let times = engine.call_times();
        assert_eq!(times.len(), 2);
        assert!(times[1].duration_since(times[0]) >= Duration::from_millis(25));
    }
}
