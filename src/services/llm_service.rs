//! LLM 服务 - 业务能力层
//!
//! 只负责"让 LLM 出一批题"的能力，不关心分批和汇总
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use futures::future::BoxFuture;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::InternalQuestion;
use crate::services::question_backend::{BatchRequest, QuestionBackend};
use crate::utils::logging::truncate_text;

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 生成一个批次的题目
/// - 解析 LLM 返回的 JSON
/// - 不关心分批、并发和题目总数
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            timeout: Duration::from_secs(config.llm_request_timeout_secs),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        // 调用 API（超时视为本批次失败）
        let response = match tokio::time::timeout(self.timeout, self.client.chat().create(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("LLM API 调用失败: {}", e);
                return Err(AppError::llm_api_failed(&self.model_name, e));
            }
            Err(_) => {
                warn!("LLM API 调用超时: {:?}", self.timeout);
                return Err(LlmError::Timeout {
                    model: self.model_name.clone(),
                    timeout_secs: self.timeout.as_secs(),
                }
                .into());
            }
        };

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    /// 生成一个批次的题目
    ///
    /// 返回的数量可能多于或少于请求数量，由编排层处理。
    pub async fn generate_questions(&self, batch: &BatchRequest) -> AppResult<Vec<InternalQuestion>> {
        debug!(
            "开始生成题目，批次 {}/{}，题数: {}, 模型: {}",
            batch.chunk_index + 1,
            batch.chunk_total,
            batch.question_count,
            self.model_name
        );

        let (user_message, system_message) = Self::build_generation_messages(batch);

        let response = self.send_to_llm(&user_message, Some(&system_message)).await?;

        let questions = Self::parse_generation_response(&response)?;

        debug!(
            "批次 {}/{} 解析出 {} 道题",
            batch.chunk_index + 1,
            batch.chunk_total,
            questions.len()
        );

        Ok(questions)
    }

    /// 构建出题消息
    ///
    /// 返回 (user_message, system_message)
    fn build_generation_messages(batch: &BatchRequest) -> (String, String) {
        let system_message = "You are an expert quiz creator. You always answer with valid JSON only, \
                              without Markdown fences or commentary."
            .to_string();

        let user_message = format!(
            r#"Your task is to generate EXACTLY {count} multiple-choice questions based on the provided context.
The difficulty of the questions must be '{difficulty}'.

It is absolutely critical that you generate the precise number of questions requested. Your response MUST be a JSON array containing exactly {count} question objects. Do not generate more or fewer questions than requested.

Each question object must have this shape:
{{
  "question": "The question text.",
  "correctAnswer": {{
    "text": "The full text of the correct answer.",
    "explanation": "A detailed, step-by-step explanation proving why this answer is correct."
  }},
  "distractors": ["wrong 1", "wrong 2", "wrong 3"]
}}

Rules:
1. "distractors" must contain exactly 3 plausible but incorrect options, none equal to the correct answer.
2. Mathematical equations, formulas, or chemical notations must use LaTeX delimiters ($...$ for inline, $$...$$ for block-level).

Context:
---
{context}
---
"#,
            count = batch.question_count,
            difficulty = batch.difficulty,
            context = batch.source_text,
        );

        (user_message, system_message)
    }

    /// 解析出题的 LLM 响应
    ///
    /// 兼容 Markdown 代码块、裸数组和 `{"questions": [...]}` 三种形式，
    /// 单个题目结构不对时跳过该题，不影响同批次其他题目。
    pub fn parse_generation_response(response: &str) -> AppResult<Vec<InternalQuestion>> {
        let response = response.trim();

        let value = extract_json(response).ok_or_else(|| LlmError::ResponseParseFailed {
            response: truncate_text(response, 200),
            reason: "没有找到合法的 JSON".to_string(),
        })?;

        let items = match value {
            JsonValue::Array(items) => items,
            JsonValue::Object(mut map) => match map.remove("questions") {
                Some(JsonValue::Array(items)) => items,
                _ => {
                    return Err(LlmError::ResponseParseFailed {
                        response: truncate_text(response, 200),
                        reason: "JSON 对象中缺少 questions 数组".to_string(),
                    }
                    .into())
                }
            },
            _ => {
                return Err(LlmError::ResponseParseFailed {
                    response: truncate_text(response, 200),
                    reason: "JSON 既不是数组也不是对象".to_string(),
                }
                .into())
            }
        };

        let mut questions = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<InternalQuestion>(item) {
                Ok(question) => questions.push(question),
                Err(e) => warn!("跳过第 {} 道无法解析的题目: {}", idx + 1, e),
            }
        }

        Ok(questions)
    }
}

impl QuestionBackend for LlmService {
    fn generate_batch<'a>(
        &'a self,
        batch: &'a BatchRequest,
    ) -> BoxFuture<'a, AppResult<Vec<InternalQuestion>>> {
        Box::pin(self.generate_questions(batch))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Markdown 代码块（可带 json 标记）
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json|JSON)?\s*([\s\S]*?)```").expect("代码块正则表达式无效")
});

/// 从 LLM 响应中提取 JSON
///
/// 依次尝试：代码块内容、整段文本、第一个 `[` 到最后一个 `]` 之间的内容。
fn extract_json(response: &str) -> Option<JsonValue> {
    let mut candidates = Vec::new();

    if let Some(inner) = FENCE_RE.captures(response).and_then(|caps| caps.get(1)) {
        candidates.push(inner.as_str().trim());
    }

    candidates.push(response);

    if let (Some(start), Some(end)) = (response.find('['), response.rfind(']')) {
        if start < end {
            candidates.push(&response[start..=end]);
        }
    }

    candidates
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<JsonValue>(candidate).ok())
}
