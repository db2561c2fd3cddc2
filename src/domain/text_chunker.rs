//! 文本分块器
//!
//! 将任意长度的文本切分为不超过字符预算的片段，
//! 优先在句末、段落、换行处断开，保证朗读顺序不变

/// 默认单块最大字符数
/// 上游 TTS 服务硬限制为 10000 字符，这里留出余量
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 9_500;

/// 文本分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单块最大字符数（按 Unicode 字符计）
    pub max_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl ChunkConfig {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

/// 西文句末标点（后面必须跟空白才算句子边界）
#[inline]
fn is_sentence_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 全角句末标点（本身即为边界）
#[inline]
fn is_fullwidth_terminal(ch: char) -> bool {
    matches!(ch, '。' | '！' | '？')
}

/// 窗口内的候选切分点（均为字节偏移）
#[derive(Debug, Default)]
struct CutCandidates {
    /// 最后一个句末标点之后的位置：(字符位置, 字节偏移)
    last_sentence: Option<(usize, usize)>,
    /// 最后一个段落分隔（连续两个换行）的位置
    last_paragraph: Option<usize>,
    /// 最后一个换行的位置
    last_newline: Option<usize>,
    /// 窗口结束位置（第 max_chars 个字符的字节偏移）
    window_end: usize,
}

/// 扫描 `text` 的前 `max_chars` 个字符，收集候选切分点
///
/// 调用方保证 `text` 的字符数大于 `max_chars`
fn scan_window(text: &str, max_chars: usize) -> CutCandidates {
    let mut candidates = CutCandidates {
        window_end: text.len(),
        ..Default::default()
    };
    let mut prev_was_newline = false;
    let mut chars = text.char_indices().enumerate().peekable();

    while let Some((n, (byte, ch))) = chars.next() {
        if n >= max_chars {
            candidates.window_end = byte;
            break;
        }

        let after = byte + ch.len_utf8();
        if is_fullwidth_terminal(ch) {
            candidates.last_sentence = Some((n + 1, after));
        } else if is_sentence_terminal(ch) {
            // 句末标点后的空白可以落在窗口之外
            let followed_by_space = chars
                .peek()
                .map(|(_, (_, next))| next.is_whitespace())
                .unwrap_or(false);
            if followed_by_space {
                candidates.last_sentence = Some((n + 1, after));
            }
        }

        match ch {
            '\n' => {
                if byte > 0 {
                    candidates.last_newline = Some(byte);
                    if prev_was_newline {
                        candidates.last_paragraph = Some(byte);
                    }
                }
                prev_was_newline = true;
            }
            '\r' => {}
            _ => prev_was_newline = false,
        }
    }

    candidates
}

/// 选择切分位置（字节偏移）
///
/// 优先级：
/// 1. 超过预算一半处的最后一个句末
/// 2. 最后一个段落分隔
/// 3. 最后一个换行
/// 4. 窗口内任意位置的最后一个句末
/// 5. 在预算边界硬切
fn choose_cut(text: &str, max_chars: usize) -> usize {
    let candidates = scan_window(text, max_chars);
    let half = max_chars / 2;

    if let Some((pos, byte)) = candidates.last_sentence {
        if pos > half {
            return byte;
        }
    }
    if let Some(byte) = candidates.last_paragraph {
        return byte;
    }
    if let Some(byte) = candidates.last_newline {
        return byte;
    }
    if let Some((_, byte)) = candidates.last_sentence {
        return byte;
    }
    candidates.window_end
}

/// 将文本切分为有序片段
///
/// - 文本字符数不超过预算时作为单个片段返回
/// - 每个片段首尾空白被裁剪，空片段被丢弃
/// - 任何片段的字符数都不超过 `config.max_chars`
pub fn split_into_chunks(text: &str, config: &ChunkConfig) -> Vec<String> {
    let max_chars = config.max_chars.max(1);

    if text.chars().nth(max_chars).is_none() {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    let mut chunks = Vec::new();
    let mut remaining = text.trim_start();

    while !remaining.is_empty() {
        if remaining.chars().nth(max_chars).is_none() {
            let tail = remaining.trim();
            if !tail.is_empty() {
                chunks.push(tail.to_string());
            }
            break;
        }

        let cut = choose_cut(remaining, max_chars);
        let head = remaining[..cut].trim();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        remaining = remaining[cut..].trim_start();
    }

    chunks
}
