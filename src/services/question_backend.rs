//! 出题后端抽象 - 业务能力层
//!
//! 编排层只依赖这个 trait，不关心背后是哪家 LLM，测试里可以换成脚本化的实现。

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Difficulty, InternalQuestion};

/// 单个批次的出题请求
///
/// 与原始请求相同，只是题目数量换成了本批次的数量。
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// 原文（所有批次共享）
    pub source_text: Arc<str>,
    pub difficulty: Difficulty,
    /// 本批次需要的题目数
    pub question_count: usize,
    /// 批次序号（从0开始）
    pub chunk_index: usize,
    /// 批次总数
    pub chunk_total: usize,
}

/// 出题后端
///
/// 返回的题目数量不保证等于请求数量，调用方负责校验。
pub trait QuestionBackend: Send + Sync {
    /// 为一个批次生成题目
    fn generate_batch<'a>(
        &'a self,
        batch: &'a BatchRequest,
    ) -> BoxFuture<'a, AppResult<Vec<InternalQuestion>>>;

    /// 后端名称（仅用于日志）
    fn name(&self) -> &str {
        "backend"
    }
}
