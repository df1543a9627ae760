//! # Quiz Generator
//!
//! 一个根据原文自动生成选择题测验的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 请求、LLM 内部题目结构、对外题目结构
//! - `models/loaders` - 从 TOML / 文本 / JSON 文件加载和保存
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心分批
//! - `QuestionBackend` - 出题后端抽象
//! - `LlmService` - 基于 OpenAI 兼容接口的出题能力
//! - `option_shuffler` - 选项打乱和答案定位
//! - `scoring` - 成绩统计
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个批次"的完整处理流程
//! - `BatchCtx` - 上下文封装（批次序号 + 题数）
//! - `BatchFlow` - 调用后端并记录结果，失败不上抛
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/chunk_planner` - 拆分批次
//! - `orchestrator/quiz_generator` - 并发调度、汇总、数量控制
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError, LlmError};
pub use models::{CorrectAnswer, Difficulty, GenerationRequest, InternalQuestion, PublicQuestion};
pub use orchestrator::{GenerationOutcome, GenerationReport, QuizGenerator};
pub use services::{BatchRequest, LlmService, QuestionBackend};
pub use workflow::{BatchCtx, BatchFlow, BatchOutcome};
