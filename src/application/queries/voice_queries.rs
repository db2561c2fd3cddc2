//! Voice Queries

/// 列出所有预置音色查询
#[derive(Debug, Clone)]
pub struct ListVoices;
