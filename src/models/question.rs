use serde::{Deserialize, Serialize};

use crate::models::Difficulty;

/// 每道题的干扰项数量
pub const DISTRACTOR_COUNT: usize = 3;

/// 一次出题请求
///
/// 每次用户开始测验时创建一次，交给编排层消费后丢弃。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub source_text: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub question_count: usize,
}

impl GenerationRequest {
    pub fn new(source_text: impl Into<String>, difficulty: Difficulty, question_count: usize) -> Self {
        Self {
            source_text: source_text.into(),
            difficulty,
            question_count,
        }
    }
}

/// 正确答案及其解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectAnswer {
    pub text: String,
    #[serde(default)]
    pub explanation: String,
}

/// LLM 直接生成的题目结构
///
/// 把正确答案文本和解析绑在一起，避免模型给出的答案下标和解析对不上。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalQuestion {
    #[serde(rename = "question", alias = "questionText")]
    pub question_text: String,
    pub correct_answer: CorrectAnswer,
    #[serde(default)]
    pub distractors: Vec<String>,
}

impl InternalQuestion {
    /// 检查结构是否完整，返回不合格的原因
    pub fn validation_issue(&self) -> Option<&'static str> {
        if self.question_text.trim().is_empty() {
            return Some("题干为空");
        }
        if self.correct_answer.text.trim().is_empty() {
            return Some("正确答案为空");
        }
        if self.distractors.len() != DISTRACTOR_COUNT {
            return Some("干扰项数量不是 3 个");
        }
        None
    }
}

/// 面向调用方的题目结构（选项已打乱）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    /// 题目在测验中的序号（从1开始）
    pub id: usize,
    #[serde(rename = "question")]
    pub question_text: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_option_index: usize,
    pub explanation: String,
}

impl PublicQuestion {
    /// 正确选项的文本
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_option_index).map(String::as_str)
    }
}

impl std::fmt::Display for PublicQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干以便显示（最多80个字符）
        let preview = if self.question_text.chars().count() > 80 {
            self.question_text.chars().take(80).collect::<String>() + "..."
        } else {
            self.question_text.clone()
        };
        write!(f, "#{} {} [答案: {}]", self.id, preview, self.correct_option_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_question_deserializes_model_shape() {
        let json = r#"{
            "question": "What is $2+2$?",
            "correctAnswer": { "text": "4", "explanation": "Basic addition." },
            "distractors": ["3", "5", "22"]
        }"#;
        let q: InternalQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_text, "What is $2+2$?");
        assert_eq!(q.correct_answer.text, "4");
        assert_eq!(q.distractors.len(), 3);
        assert!(q.validation_issue().is_none());
    }

    #[test]
    fn test_validation_rejects_wrong_distractor_count() {
        let q = InternalQuestion {
            question_text: "Q".to_string(),
            correct_answer: CorrectAnswer {
                text: "A".to_string(),
                explanation: String::new(),
            },
            distractors: vec!["B".to_string(), "C".to_string()],
        };
        assert!(q.validation_issue().is_some());
    }

    #[test]
    fn test_public_question_uses_frontend_field_names() {
        let q = PublicQuestion {
            id: 1,
            question_text: "Q".to_string(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_option_index: 2,
            explanation: "because".to_string(),
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["question"], "Q");
        assert_eq!(value["correctAnswerIndex"], 2);
        assert_eq!(q.correct_option(), Some("C"));
    }
}
