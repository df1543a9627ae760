//! 批次处理流程 - 流程层
//!
//! 核心职责：定义"一个批次"的完整处理流程
//!
//! 流程顺序：
//! 1. 调用出题后端
//! 2. 记录数量偏差（多出 / 不足）
//! 3. 失败时只记录，不向上抛出

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::InternalQuestion;
use crate::services::{BatchRequest, QuestionBackend};
use crate::workflow::batch_ctx::BatchCtx;

/// 批次处理结果
#[derive(Debug)]
pub enum BatchOutcome {
    /// 后端返回了题目（数量不一定等于请求数量）
    Success(Vec<InternalQuestion>),
    /// 后端调用失败，本批次贡献 0 道题
    Failed(AppError),
}

/// 批次处理流程
///
/// - 只处理单个批次
/// - 不持有任何跨批次的状态
/// - 只依赖出题能力（QuestionBackend）
#[derive(Clone)]
pub struct BatchFlow {
    backend: Arc<dyn QuestionBackend>,
}

impl BatchFlow {
    /// 创建新的批次处理流程
    pub fn new(backend: Arc<dyn QuestionBackend>) -> Self {
        Self { backend }
    }

    pub async fn run(&self, batch: &BatchRequest) -> BatchOutcome {
        let ctx = BatchCtx::new(batch.chunk_index, batch.chunk_total, batch.question_count);
        let started = Instant::now();

        info!("{} 🤖 正在调用 {} 出题...", ctx, self.backend.name());

        match self.backend.generate_batch(batch).await {
            Ok(questions) => {
                let produced = questions.len();
                if produced < batch.question_count {
                    warn!(
                        "{} ⚠️ 题目不足: 生成 {}/{} 道 (耗时 {:.1}s)",
                        ctx,
                        produced,
                        batch.question_count,
                        started.elapsed().as_secs_f32()
                    );
                } else if produced > batch.question_count {
                    info!(
                        "{} ✓ 完成，多生成了 {} 道 (共 {} 道，耗时 {:.1}s)",
                        ctx,
                        produced - batch.question_count,
                        produced,
                        started.elapsed().as_secs_f32()
                    );
                } else {
                    info!(
                        "{} ✓ 完成，生成 {} 道 (耗时 {:.1}s)",
                        ctx,
                        produced,
                        started.elapsed().as_secs_f32()
                    );
                }
                BatchOutcome::Success(questions)
            }
            Err(e) => {
                error!("{} ❌ 批次失败: {}", ctx, e);
                BatchOutcome::Failed(e)
            }
        }
    }
}
