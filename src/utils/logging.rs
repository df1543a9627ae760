/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::GenerationReport;
use crate::services::QuizResult;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则默认 `info`（详细模式为 `debug`）。
/// 重复调用是安全的。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测验生成模式");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("📦 每批题数: {} | 最大题数: {}", config.chunk_size, config.max_questions);
    info!("{}", "=".repeat(60));
}

/// 记录批次拆分信息
///
/// # 参数
/// - `total`: 题目总数
/// - `chunk_sizes`: 每个批次的题目数
pub fn log_chunk_plan(total: usize, chunk_sizes: &[usize]) {
    info!("\n{}", "=".repeat(60));
    info!("📋 共需 {} 道题，拆分为 {} 个批次: {:?}", total, chunk_sizes.len(), chunk_sizes);
    info!("💡 所有批次同时提交\n");
}

/// 记录生成完成信息
pub fn log_generation_complete(report: &GenerationReport) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 出题完成: {} 道 (收集 {} 道，成功批次 {}/{})",
        report.requested,
        report.collected,
        report.chunk_sizes.len() - report.failed_batches.len(),
        report.chunk_sizes.len()
    );
    if report.truncated > 0 {
        info!("✂️ 截掉多余题目: {} 道", report.truncated);
    }
    if report.dropped_invalid > 0 {
        warn!("⚠️ 丢弃不合格题目: {} 道", report.dropped_invalid);
    }
    for failure in &report.failed_batches {
        warn!(
            "⚠️ 批次 {} ({} 道) 失败: {}",
            failure.chunk_index + 1,
            failure.question_count,
            failure.message
        );
    }
    for item in &report.malformed {
        warn!(
            "⚠️ 题目 {} 存在问题 ({:?}): {}",
            item.question_id,
            item.reason,
            truncate_text(&item.question_text, 40)
        );
    }
    info!("{}", "─".repeat(60));
}

/// 打印生成结果统计
///
/// # 参数
/// - `report`: 生成报告
/// - `output_file`: 结果文件路径
pub fn print_final_stats(report: &GenerationReport, output_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 生成完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 题目: {} 道", report.requested);
    info!("❌ 失败批次: {}", report.failed_batches.len());
    info!("🩹 问题题目: {}", report.malformed.len());
    info!("{}", "=".repeat(60));
    info!("\n测验已保存至: {}", output_file);
}

/// 打印测验成绩
pub fn print_quiz_result(result: &QuizResult) {
    info!("\n{}", "=".repeat(60));
    info!("📊 测验结果");
    info!("{}", "=".repeat(60));
    info!("🏆 得分: {}", result.score_display());
    info!("✅ 正确: {}", result.correct);
    info!("❌ 错误: {} (其中未作答 {})", result.incorrect, result.unanswered);
    info!("⏱️ 用时: {}", result.time_display());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
