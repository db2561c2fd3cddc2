//! Synthesize Commands - 语音合成命令

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechCommand {
    /// 朗读文本，缺失与空串同等处理
    pub text: Option<String>,
    /// 音色名称，缺失时使用默认音色
    pub voice: Option<String>,
}

/// 合成语音响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    /// base64 编码后的完整音频
    pub audio_content: String,
    /// 音频 MIME 类型
    pub content_type: &'static str,
    /// 输入文本字符数
    pub text_length: usize,
    /// 请求的音色名称
    pub voice: String,
    /// 分块数量
    pub chunks: usize,
    /// 拼接后音频字节数
    pub audio_bytes: usize,
}
