//! 选项打乱 - 业务能力层
//!
//! 把 LLM 的内部题目结构转换成对外结构：正确答案和干扰项合并后打乱，
//! 再按文本找回正确答案的新位置。

use rand::Rng;
use tracing::warn;

use crate::models::{InternalQuestion, PublicQuestion};

/// 坏题的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// 打乱后找不到正确答案文本
    AnswerNotFound,
    /// 干扰项中出现了与正确答案相同的文本
    AnswerDuplicated,
}

/// 坏题的诊断信息（不影响出题结果）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedItem {
    /// 题目序号（从1开始）
    pub question_id: usize,
    pub question_text: String,
    pub correct_answer: String,
    pub reason: MalformedReason,
}

/// Fisher–Yates 洗牌
///
/// `i` 从最后一个下标递减到 1，`j` 在 `[0, i]` 中均匀抽取。
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// 把一道内部题目转换为对外题目
///
/// 打乱后找不到正确答案文本时（后端不可信），下标回退为 0 并返回诊断信息，
/// 不让单道坏题影响整份测验。
pub fn shape_question<R: Rng + ?Sized>(
    id: usize,
    question: InternalQuestion,
    rng: &mut R,
) -> (PublicQuestion, Option<MalformedItem>) {
    let InternalQuestion {
        question_text,
        correct_answer,
        distractors,
    } = question;

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct_answer.text.clone());
    options.extend(distractors);

    fisher_yates(&mut options, rng);

    let matches = options
        .iter()
        .filter(|option| **option == correct_answer.text)
        .count();

    let (correct_option_index, reason) =
        match options.iter().position(|option| *option == correct_answer.text) {
            Some(index) if matches > 1 => {
                warn!("⚠️ 题目 {} 的干扰项与正确答案重复", id);
                (index, Some(MalformedReason::AnswerDuplicated))
            }
            Some(index) => (index, None),
            None => {
                warn!("⚠️ 题目 {} 打乱后找不到正确答案，默认使用第 1 个选项", id);
                (0, Some(MalformedReason::AnswerNotFound))
            }
        };

    let malformed = reason.map(|reason| MalformedItem {
        question_id: id,
        question_text: question_text.clone(),
        correct_answer: correct_answer.text.clone(),
        reason,
    });

    let public = PublicQuestion {
        id,
        question_text,
        options,
        correct_option_index,
        explanation: correct_answer.explanation,
    };

    (public, malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CorrectAnswer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_question() -> InternalQuestion {
        InternalQuestion {
            question_text: "Which planet is known as the Red Planet?".to_string(),
            correct_answer: CorrectAnswer {
                text: "Mars".to_string(),
                explanation: "Iron oxide on its surface.".to_string(),
            },
            distractors: vec!["Earth".to_string(), "Jupiter".to_string(), "Venus".to_string()],
        }
    }

    #[test]
    fn test_correct_answer_index_points_to_answer() {
        let mut rng = StdRng::seed_from_u64(42);
        for id in 1..=50 {
            let (public, malformed) = shape_question(id, sample_question(), &mut rng);
            assert!(malformed.is_none());
            assert_eq!(public.options.len(), 4);
            assert_eq!(public.options[public.correct_option_index], "Mars");
            assert_eq!(public.explanation, "Iron oxide on its surface.");
        }
    }

    #[test]
    fn test_options_are_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let (public, _) = shape_question(1, sample_question(), &mut rng);
        let mut sorted = public.options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["Earth", "Jupiter", "Mars", "Venus"]);
    }

    #[test]
    fn test_same_seed_same_order() {
        let (a, _) = shape_question(1, sample_question(), &mut StdRng::seed_from_u64(3));
        let (b, _) = shape_question(1, sample_question(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_correct_position_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 4];
        let trials = 4000;

        for _ in 0..trials {
            let (public, _) = shape_question(1, sample_question(), &mut rng);
            counts[public.correct_option_index] += 1;
        }

        // 期望每个位置 1000 次，标准差约 27
        for count in counts {
            assert!((850..=1150).contains(&count), "分布不均匀: {:?}", counts);
        }
    }

    #[test]
    fn test_duplicated_answer_is_reported_not_fatal() {
        let mut question = sample_question();
        question.distractors[1] = "Mars".to_string();

        let mut rng = StdRng::seed_from_u64(11);
        let (public, malformed) = shape_question(5, question, &mut rng);

        assert_eq!(public.options[public.correct_option_index], "Mars");
        let malformed = malformed.expect("重复答案应当被记录");
        assert_eq!(malformed.question_id, 5);
        assert_eq!(malformed.reason, MalformedReason::AnswerDuplicated);
    }

    #[test]
    fn test_fisher_yates_handles_short_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        fisher_yates(&mut empty, &mut rng);
        let mut single = vec![9];
        fisher_yates(&mut single, &mut rng);
        assert_eq!(single, vec![9]);
    }
}
