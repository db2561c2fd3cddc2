//! Voice Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::VoiceListDto;
use crate::infrastructure::http::state::AppState;

/// 列出预置音色
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoiceListDto> {
    Json(state.list_voices_handler.handle(ListVoices).into())
}
