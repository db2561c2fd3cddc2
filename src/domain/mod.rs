//! 领域层
//!
//! - text_chunker: 文本分块
//! - voice: 音色表
//! - audio: 音频拼接与传输编码

pub mod audio;
pub mod text_chunker;
pub mod voice;

pub use audio::{concat_segments, encode_base64, AUDIO_CONTENT_TYPE};
pub use text_chunker::{split_into_chunks, ChunkConfig, DEFAULT_MAX_CHUNK_CHARS};
pub use voice::{resolve as resolve_voice, ResolvedVoice, VoiceEntry, DEFAULT_VOICE_KEY};
