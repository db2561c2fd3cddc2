//! 音频拼接与传输编码

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// 音频输出 MIME 类型
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// base64 分段编码的每段字节数
/// 必须是 3 的倍数，否则分段结果拼接后会夹带填充字符
pub const ENCODE_PIECE_BYTES: usize = 3 * 10 * 1024;

/// 按顺序拼接音频片段
pub fn concat_segments(segments: Vec<Vec<u8>>) -> Vec<u8> {
    let total: usize = segments.iter().map(Vec::len).sum();
    let mut combined = Vec::with_capacity(total);
    for segment in segments {
        combined.extend_from_slice(&segment);
    }
    combined
}

/// 分段 base64 编码
pub fn encode_base64(audio: &[u8]) -> String {
    encode_base64_in_pieces(audio, ENCODE_PIECE_BYTES)
}

fn encode_base64_in_pieces(audio: &[u8], piece_bytes: usize) -> String {
    debug_assert!(piece_bytes > 0 && piece_bytes % 3 == 0);

    let mut encoded = String::with_capacity(audio.len().div_ceil(3) * 4);
    for piece in audio.chunks(piece_bytes) {
        BASE64.encode_string(piece, &mut encoded);
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_preserves_order_and_length() {
        let combined = concat_segments(vec![vec![1, 2], vec![], vec![3, 4, 5]]);
        assert_eq!(combined, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_piecewise_encoding_matches_single_pass() {
        let audio: Vec<u8> = (0..100_003u32).map(|i| (i % 251) as u8).collect();
        assert_eq!(encode_base64(&audio), BASE64.encode(&audio));
        assert_eq!(encode_base64_in_pieces(&audio, 3), BASE64.encode(&audio));
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_base64(&[]), "");
    }
}
