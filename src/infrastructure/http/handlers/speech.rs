//! Speech Handlers
//!
//! POST /api/text-to-speech

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::Instrument;

use crate::application::SynthesizeSpeechCommand;
use crate::infrastructure::http::dto::{TextToSpeechRequest, TextToSpeechResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::RequestId;
use crate::infrastructure::http::state::AppState;

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<TextToSpeechRequest>, JsonRejection>,
) -> Result<Json<TextToSpeechResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let request_id = request_id
        .map(|Extension(RequestId(id))| id)
        .unwrap_or_default();
    let span = tracing::info_span!("text_to_speech", request_id = %request_id);

    let cmd = SynthesizeSpeechCommand {
        text: req.text,
        voice: req.voice,
    };

    let result = state
        .synthesize_handler
        .handle(cmd)
        .instrument(span)
        .await?;

    Ok(Json(result.into()))
}
