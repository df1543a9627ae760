//! 测验生成器 - 编排层
//!
//! ## 职责
//!
//! 把一次出题请求变成**恰好** `question_count` 道合格题目，或者明确失败。
//!
//! ## 核心功能
//!
//! 1. **请求校验**：原文为空、题目数量越界时直接拒绝，不调用后端
//! 2. **分批**：按 `chunk_size` 拆分题目数量
//! 3. **并发调度**：所有批次同时提交（每个批次一个 tokio::spawn，不设并发上限）
//! 4. **全部结算**：按提交顺序等待每个批次，单个批次失败不影响其他批次
//! 5. **数量控制**：不足时报错，多出时截断
//! 6. **选项打乱**：在汇总后单线程完成，使用可注入的随机数源
//!
//! ## 设计特点
//!
//! - **向下委托**：单个批次的调用交给 `workflow::BatchFlow`
//! - **无共享可变状态**：批次之间互不依赖，只在全部结束后汇总

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use tracing::{error, warn};

use crate::config::{Config, DEFAULT_MAX_QUESTIONS};
use crate::error::{AppError, AppResult, GenerationError};
use crate::models::{GenerationRequest, InternalQuestion, PublicQuestion};
use crate::orchestrator::chunk_planner::plan_chunks;
use crate::services::{shape_question, BatchRequest, MalformedItem, QuestionBackend};
use crate::utils::logging;
use crate::workflow::{BatchFlow, BatchOutcome};

/// 生成器参数
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSettings {
    /// 每个批次的最大题目数
    pub chunk_size: usize,
    /// 单次请求允许的最大题目数
    pub max_questions: usize,
}

impl From<&Config> for GeneratorSettings {
    fn from(config: &Config) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            max_questions: config.max_questions.min(DEFAULT_MAX_QUESTIONS),
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// 失败批次的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// 批次序号（从0开始）
    pub chunk_index: usize,
    pub question_count: usize,
    pub message: String,
}

/// 一次生成的诊断报告
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub requested: usize,
    /// 每个批次请求的题目数
    pub chunk_sizes: Vec<usize>,
    /// 通过校验的题目数（截断前）
    pub collected: usize,
    /// 结构不合格被丢弃的题目数
    pub dropped_invalid: usize,
    /// 因多出而被截掉的题目数
    pub truncated: usize,
    pub failed_batches: Vec<BatchFailure>,
    pub malformed: Vec<MalformedItem>,
}

/// 生成结果（题目 + 报告）
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub questions: Vec<PublicQuestion>,
    pub report: GenerationReport,
}

/// 测验生成器
pub struct QuizGenerator {
    flow: BatchFlow,
    settings: GeneratorSettings,
    rng: Mutex<StdRng>,
}

impl QuizGenerator {
    /// 创建生成器（随机数源来自系统熵）
    pub fn new(backend: Arc<dyn QuestionBackend>, config: &Config) -> Self {
        Self::with_rng(backend, GeneratorSettings::from(config), StdRng::from_entropy())
    }

    /// 使用指定的随机数源创建生成器
    ///
    /// 固定种子时，选项顺序与批次完成的先后无关，结果可复现。
    /// 题目上限不会超过 `DEFAULT_MAX_QUESTIONS`。
    pub fn with_rng(backend: Arc<dyn QuestionBackend>, settings: GeneratorSettings, rng: StdRng) -> Self {
        let settings = GeneratorSettings {
            chunk_size: settings.chunk_size.max(1),
            max_questions: settings.max_questions.min(DEFAULT_MAX_QUESTIONS),
        };

        Self {
            flow: BatchFlow::new(backend),
            settings,
            rng: Mutex::new(rng),
        }
    }

    /// 生成测验
    ///
    /// 成功时返回的题目数量恰好等于 `request.question_count`。
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<PublicQuestion>> {
        self.generate_with_report(request)
            .await
            .map(|outcome| outcome.questions)
    }

    /// 生成测验并返回诊断报告
    pub async fn generate_with_report(&self, request: &GenerationRequest) -> AppResult<GenerationOutcome> {
        self.validate_request(request)?;

        let chunk_sizes = plan_chunks(request.question_count, self.settings.chunk_size);
        logging::log_chunk_plan(request.question_count, &chunk_sizes);

        let batches = build_batches(request, &chunk_sizes);
        let outcomes = self.dispatch_batches(batches).await;

        let mut report = GenerationReport {
            requested: request.question_count,
            chunk_sizes,
            ..Default::default()
        };

        // 按批次顺序汇总，批次内保持模型返回的顺序
        let mut collected: Vec<InternalQuestion> = Vec::with_capacity(request.question_count);
        for (batch, outcome) in outcomes {
            match outcome {
                BatchOutcome::Success(questions) => {
                    for question in questions {
                        match question.validation_issue() {
                            Some(issue) => {
                                warn!(
                                    "[批次 {}] ⚠️ 丢弃不合格题目 ({}): {}",
                                    batch.chunk_index + 1,
                                    issue,
                                    logging::truncate_text(&question.question_text, 40)
                                );
                                report.dropped_invalid += 1;
                            }
                            None => collected.push(question),
                        }
                    }
                }
                BatchOutcome::Failed(e) => report.failed_batches.push(BatchFailure {
                    chunk_index: batch.chunk_index,
                    question_count: batch.question_count,
                    message: e.to_string(),
                }),
            }
        }

        report.collected = collected.len();

        if collected.len() < request.question_count {
            error!(
                "❌ 题目数量不足: {}/{} (失败批次: {}, 丢弃: {})",
                collected.len(),
                request.question_count,
                report.failed_batches.len(),
                report.dropped_invalid
            );
            return Err(GenerationError::InsufficientGeneration {
                produced: collected.len(),
                requested: request.question_count,
                failed_batches: report.failed_batches.len(),
            }
            .into());
        }

        report.truncated = collected.len() - request.question_count;
        collected.truncate(request.question_count);

        let (questions, malformed) = self.shape_all(collected);
        report.malformed = malformed;

        logging::log_generation_complete(&report);

        Ok(GenerationOutcome { questions, report })
    }

    /// 校验请求（在任何后端调用之前）
    fn validate_request(&self, request: &GenerationRequest) -> AppResult<()> {
        if request.source_text.trim().is_empty() {
            warn!("⚠️ 原文为空，拒绝出题");
            return Err(GenerationError::EmptyInput.into());
        }

        if request.question_count == 0 || request.question_count > self.settings.max_questions {
            return Err(GenerationError::InvalidQuestionCount {
                requested: request.question_count,
                max: self.settings.max_questions,
            }
            .into());
        }

        Ok(())
    }

    /// 同时提交所有批次，并按提交顺序等待全部结束
    ///
    /// 批次数最多为 `ceil(max_questions / chunk_size)`，全部同时在途。
    async fn dispatch_batches(&self, batches: Vec<BatchRequest>) -> Vec<(BatchRequest, BatchOutcome)> {
        let mut handles = Vec::with_capacity(batches.len());

        // 为每个批次创建并发任务
        for batch in batches {
            let flow = self.flow.clone();
            let task_batch = batch.clone();

            let handle = tokio::spawn(async move { flow.run(&task_batch).await });
            handles.push((batch, handle));
        }

        // 等待所有任务结算（不会因为某个批次失败而提前返回）
        let mut outcomes = Vec::with_capacity(handles.len());
        for (batch, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("[批次 {}] 任务执行失败: {}", batch.chunk_index + 1, e);
                    BatchOutcome::Failed(AppError::Other(format!("批次任务执行失败: {}", e)))
                }
            };
            outcomes.push((batch, outcome));
        }

        outcomes
    }

    /// 打乱选项并编号
    fn shape_all(&self, questions: Vec<InternalQuestion>) -> (Vec<PublicQuestion>, Vec<MalformedItem>) {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut shaped = Vec::with_capacity(questions.len());
        let mut malformed = Vec::new();

        for (index, question) in questions.into_iter().enumerate() {
            let (public, issue) = shape_question(index + 1, question, &mut *rng);
            shaped.push(public);
            malformed.extend(issue);
        }

        (shaped, malformed)
    }
}

/// 为每个批次构建请求
fn build_batches(request: &GenerationRequest, chunk_sizes: &[usize]) -> Vec<BatchRequest> {
    let source_text: Arc<str> = Arc::from(request.source_text.as_str());
    let chunk_total = chunk_sizes.len();

    chunk_sizes
        .iter()
        .enumerate()
        .map(|(chunk_index, &question_count)| BatchRequest {
            source_text: source_text.clone(),
            difficulty: request.difficulty,
            question_count,
            chunk_index,
            chunk_total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_build_batches_keeps_request_fields() {
        let request = GenerationRequest::new("Cells divide by mitosis.", Difficulty::Easy, 23);
        let batches = build_batches(&request, &plan_chunks(23, 10));

        assert_eq!(batches.len(), 3);
        let counts: Vec<usize> = batches.iter().map(|b| b.question_count).collect();
        assert_eq!(counts, vec![10, 10, 3]);
        for (index, batch) in batches.iter().enumerate() {
            assert_eq!(batch.chunk_index, index);
            assert_eq!(batch.chunk_total, 3);
            assert_eq!(batch.difficulty, Difficulty::Easy);
            assert_eq!(&*batch.source_text, "Cells divide by mitosis.");
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            chunk_size: 25,
            max_questions: 200,
            ..Config::default()
        };
        let settings = GeneratorSettings::from(&config);
        assert_eq!(settings.chunk_size, 25);
        assert_eq!(settings.max_questions, 50);
    }
}
