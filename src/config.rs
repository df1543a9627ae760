use crate::error::{AppResult, ConfigError};
use crate::models::Difficulty;

/// 单次 LLM 调用最多生成的题目数
pub const DEFAULT_CHUNK_SIZE: usize = 10;
/// 单次测验允许的最大题目数
pub const DEFAULT_MAX_QUESTIONS: usize = 50;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 单个批次调用的超时时间（秒）
    pub llm_request_timeout_secs: u64,
    // --- 出题配置 ---
    /// 每个批次的最大题目数
    pub chunk_size: usize,
    /// 单次请求允许的最大题目数
    pub max_questions: usize,
    pub default_difficulty: Difficulty,
    pub default_question_count: usize,
    // --- 输出配置 ---
    /// 生成结果写入的 JSON 文件
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 8192,
            llm_request_timeout_secs: 120,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_questions: DEFAULT_MAX_QUESTIONS,
            default_difficulty: Difficulty::Medium,
            default_question_count: 10,
            output_file: "quiz.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_max_tokens),
            llm_request_timeout_secs: std::env::var("LLM_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_request_timeout_secs),
            chunk_size: std::env::var("QUIZ_CHUNK_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.chunk_size),
            max_questions: std::env::var("QUIZ_MAX_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_questions),
            default_difficulty: std::env::var("QUIZ_DEFAULT_DIFFICULTY").ok().and_then(|v| Difficulty::from_str(&v)).unwrap_or(default.default_difficulty),
            default_question_count: std::env::var("QUIZ_DEFAULT_QUESTION_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_question_count),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查配置的取值范围
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size", "必须大于 0").into());
        }
        if !(1..=DEFAULT_MAX_QUESTIONS).contains(&self.max_questions) {
            return Err(invalid(
                "max_questions",
                &format!("必须在 [1, {}] 范围内", DEFAULT_MAX_QUESTIONS),
            )
            .into());
        }
        if self.llm_request_timeout_secs == 0 {
            return Err(invalid("llm_request_timeout_secs", "必须大于 0").into());
        }
        if !(1..=self.max_questions).contains(&self.default_question_count) {
            return Err(invalid(
                "default_question_count",
                &format!("必须在 [1, {}] 范围内", self.max_questions),
            )
            .into());
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.max_questions, 50);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = Config {
            chunk_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_questions_cannot_exceed_fifty() {
        let config = Config {
            max_questions: 200,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_questions: 20,
            default_question_count: 5,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_question_count_out_of_range() {
        let config = Config {
            default_question_count: 51,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
