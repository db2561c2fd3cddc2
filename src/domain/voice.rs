//! 音色表
//!
//! 人类可读的音色名称到上游 TTS 服务音色 ID 的固定映射

/// 默认音色名称
pub const DEFAULT_VOICE_KEY: &str = "george";

/// 音色表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceEntry {
    /// 音色名称（小写）
    pub key: &'static str,
    /// 上游服务的音色 ID
    pub provider_id: &'static str,
}

/// ElevenLabs 预置音色
const VOICES: &[VoiceEntry] = &[
    VoiceEntry { key: "aria", provider_id: "9BWtsMINqrJLrRacOk9x" },
    VoiceEntry { key: "roger", provider_id: "CwhRBWXzGAHq8TQ4Fs17" },
    VoiceEntry { key: "sarah", provider_id: "EXAVITQu4vr4xnJW0Mh8" },
    VoiceEntry { key: "laura", provider_id: "FGY2WhTYpPnrIDTdsKH5" },
    VoiceEntry { key: "charlie", provider_id: "IKne3meq5aSn9XLyUdCD" },
    VoiceEntry { key: "george", provider_id: "JBFqnCBsd6RMkjVDRZzb" },
    VoiceEntry { key: "callum", provider_id: "N2lVS1w4EtoT3dr4eOWO" },
    VoiceEntry { key: "river", provider_id: "SAz9YHcvj6GT2YYXdXww" },
    VoiceEntry { key: "liam", provider_id: "TX3LPaxmHKxFdv7VOQHJ" },
    VoiceEntry { key: "charlotte", provider_id: "XB0fDUnXU5powFXDhCwa" },
    VoiceEntry { key: "alice", provider_id: "Xb7hH8MSUJpSbSDYk0k2" },
    VoiceEntry { key: "matilda", provider_id: "XrExE9yKIg1WjnnlVkGU" },
    VoiceEntry { key: "will", provider_id: "bIHbv24MWmeRgasZH58o" },
    VoiceEntry { key: "jessica", provider_id: "cgSgspJ2msm6clMCkdW9" },
    VoiceEntry { key: "eric", provider_id: "cjVigY5qzO86Huf0OWal" },
    VoiceEntry { key: "chris", provider_id: "iP95p4xoKVk53GoZ742B" },
    VoiceEntry { key: "brian", provider_id: "nPczCjzI2devNBz1zQrb" },
    VoiceEntry { key: "daniel", provider_id: "onwK4e9ZLuTAKqWW03F9" },
    VoiceEntry { key: "lily", provider_id: "pFZP5JQG7iQjIQuC4Bku" },
    VoiceEntry { key: "bill", provider_id: "pqHfZKP75CvOlQylNhV4" },
];

/// 解析后的音色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVoice {
    /// 请求中的原始音色名称
    pub key: String,
    /// 实际发送给上游的音色 ID
    pub provider_id: String,
    /// 是否命中音色表
    pub known: bool,
}

/// 按名称查找音色（忽略大小写）
pub fn lookup(key: &str) -> Option<&'static VoiceEntry> {
    let key = key.trim();
    VOICES.iter().find(|v| v.key.eq_ignore_ascii_case(key))
}

/// 解析音色名称
///
/// 未命中音色表时，原值作为上游音色 ID 直接透传
pub fn resolve(key: &str) -> ResolvedVoice {
    match lookup(key) {
        Some(entry) => ResolvedVoice {
            key: key.to_string(),
            provider_id: entry.provider_id.to_string(),
            known: true,
        },
        None => ResolvedVoice {
            key: key.to_string(),
            provider_id: key.to_string(),
            known: false,
        },
    }
}

/// 列出所有预置音色
pub fn list_voices() -> &'static [VoiceEntry] {
    VOICES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_voice() {
        let voice = resolve("george");
        assert!(voice.known);
        assert_eq!(voice.provider_id, "JBFqnCBsd6RMkjVDRZzb");
    }

    #[test]
    fn test_lookup_ignores_case() {
        let voice = resolve("Sarah");
        assert!(voice.known);
        assert_eq!(voice.key, "Sarah");
        assert_eq!(voice.provider_id, "EXAVITQu4vr4xnJW0Mh8");
    }

    #[test]
    fn test_unknown_voice_passes_through() {
        let voice = resolve("21m00Tcm4TlvDq8ikWAM");
        assert!(!voice.known);
        assert_eq!(voice.provider_id, "21m00Tcm4TlvDq8ikWAM");
    }

    #[test]
    fn test_default_voice_is_in_table() {
        assert!(lookup(DEFAULT_VOICE_KEY).is_some());
    }

    #[test]
    fn test_keys_are_unique() {
        let voices = list_voices();
        for (i, a) in voices.iter().enumerate() {
            assert!(voices[i + 1..].iter().all(|b| b.key != a.key));
        }
    }
}
