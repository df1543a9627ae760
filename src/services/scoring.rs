//! 成绩统计 - 业务能力层
//!
//! 根据作答记录计算一次测验的得分

use std::time::Duration;

use crate::models::PublicQuestion;

/// 一次测验的结果
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub total: usize,
    pub correct: usize,
    /// 答错 + 未作答
    pub incorrect: usize,
    pub unanswered: usize,
    /// 百分制得分
    pub score_percent: f64,
    pub time_taken: Duration,
}

impl QuizResult {
    /// 得分（保留两位小数）
    pub fn score_display(&self) -> String {
        format!("{:.2}%", self.score_percent)
    }

    /// 用时，例如 `3m 7s`
    pub fn time_display(&self) -> String {
        let secs = self.time_taken.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// 计算测验结果
///
/// `answers` 比题目少时，缺少的部分按未作答处理。
pub fn grade(questions: &[PublicQuestion], answers: &[Option<usize>], time_taken: Duration) -> QuizResult {
    let mut correct = 0;
    let mut unanswered = 0;

    for (index, question) in questions.iter().enumerate() {
        match answers.get(index).copied().flatten() {
            Some(answer) if answer == question.correct_option_index => correct += 1,
            Some(_) => {}
            None => unanswered += 1,
        }
    }

    let total = questions.len();
    let score_percent = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };

    QuizResult {
        total,
        correct,
        incorrect: total - correct,
        unanswered,
        score_percent,
        time_taken,
    }
}
