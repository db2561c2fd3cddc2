//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{SynthesizeSpeechResponse, VoiceListResponse};

// ============================================================================
// 错误响应
// ============================================================================

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TextToSpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechResponse {
    pub success: bool,
    pub audio_content: String,
    pub content_type: String,
    pub text_length: usize,
    pub voice: String,
    pub chunks: usize,
}

impl From<SynthesizeSpeechResponse> for TextToSpeechResponse {
    fn from(result: SynthesizeSpeechResponse) -> Self {
        Self {
            success: true,
            audio_content: result.audio_content,
            content_type: result.content_type.to_string(),
            text_length: result.text_length,
            voice: result.voice,
            chunks: result.chunks,
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    pub key: String,
    pub voice_id: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceListDto {
    pub default: String,
    pub voices: Vec<VoiceDto>,
}

impl From<VoiceListResponse> for VoiceListDto {
    fn from(result: VoiceListResponse) -> Self {
        Self {
            default: result.default_voice,
            voices: result
                .voices
                .into_iter()
                .map(|v| VoiceDto {
                    key: v.key,
                    voice_id: v.voice_id,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_uses_camel_case() {
        let dto = TextToSpeechResponse {
            success: true,
            audio_content: "AAA=".to_string(),
            content_type: "audio/mpeg".to_string(),
            text_length: 5,
            voice: "george".to_string(),
            chunks: 1,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["audioContent"], "AAA=");
        assert_eq!(json["contentType"], "audio/mpeg");
        assert_eq!(json["textLength"], 5);
        assert_eq!(json["chunks"], 1);
    }

    #[test]
    fn test_request_fields_are_optional() {
        let req: TextToSpeechRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none());
        assert!(req.voice.is_none());
    }
}
