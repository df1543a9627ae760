//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责分批和并发调度，是整个出题流程的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `chunk_planner` - 批次拆分
//! - 按单次调用上限把题目总数拆成若干批次
//!
//! ### `quiz_generator` - 测验生成器
//! - 校验请求
//! - 同时提交所有批次（每个批次一个 tokio::spawn）
//! - 等待全部批次结算并按顺序汇总
//! - 保证题目数量恰好等于请求数量
//! - 打乱选项，输出诊断报告
//!
//! ## 层次关系
//!
//! ```text
//! quiz_generator (处理一次请求)
//!     ↓
//! workflow::BatchFlow (处理单个批次)
//!     ↓
//! services (能力层：backend / shuffler)
//! ```

pub mod chunk_planner;
pub mod quiz_generator;

// 重新导出主要类型
pub use chunk_planner::plan_chunks;
pub use quiz_generator::{
    BatchFailure, GenerationOutcome, GenerationReport, GeneratorSettings, QuizGenerator,
};
