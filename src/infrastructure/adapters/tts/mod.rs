//! TTS Adapter - TTS 客户端实现

mod elevenlabs_client;
mod fake_tts_client;

pub use elevenlabs_client::*;
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
