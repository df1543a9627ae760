//! 批次上下文
//!
//! 封装"我正在处理第几个批次、要几道题"这一信息

use std::fmt::Display;

/// 批次上下文
#[derive(Debug, Clone, Copy)]
pub struct BatchCtx {
    /// 批次序号（从0开始）
    pub chunk_index: usize,

    /// 批次总数
    pub chunk_total: usize,

    /// 本批次请求的题目数
    pub question_count: usize,
}

impl BatchCtx {
    /// 创建新的批次上下文
    pub fn new(chunk_index: usize, chunk_total: usize, question_count: usize) -> Self {
        Self {
            chunk_index,
            chunk_total,
            question_count,
        }
    }
}

impl Display for BatchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[批次 {}/{} 题数#{}]",
            self.chunk_index + 1,
            self.chunk_total,
            self.question_count
        )
    }
}
