use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 出题流程错误（面向调用方）
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// LLM 服务错误（单个批次的后端失败）
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（如批次任务异常退出）
    #[error("错误: {0}")]
    Other(String),
}

/// 出题流程错误
///
/// 这一层的错误会直接展示给用户，所以消息需要给出下一步建议。
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 没有提供任何文本
    #[error("未提供任何文本内容，请粘贴文本或上传文档后再生成测验")]
    EmptyInput,
    /// 题目数量超出范围
    #[error("题目数量 {requested} 无效，允许范围为 [1, {max}]")]
    InvalidQuestionCount { requested: usize, max: usize },
    /// 所有批次结束后题目数量仍然不足
    #[error(
        "AI 未能生成全部题目：只生成了 {produced}/{requested} 道（失败批次: {failed_batches}），请重试或减少题目数量"
    )]
    InsufficientGeneration {
        produced: usize,
        requested: usize,
        failed_batches: usize,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 返回内容无法解析为题目列表
    #[error("无法解析LLM返回的题目 (响应: {response}): {reason}")]
    ResponseParseFailed { response: String, reason: String },
    /// 调用超时
    #[error("LLM调用超时 (模型: {model}, {timeout_secs}秒)")]
    Timeout { model: String, timeout_secs: u64 },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 从第三方错误类型转换 ==========

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 是否为"输入为空"错误
    pub fn is_empty_input(&self) -> bool {
        matches!(self, AppError::Generation(GenerationError::EmptyInput))
    }

    /// 是否为"题目数量不足"错误
    pub fn is_insufficient_generation(&self) -> bool {
        matches!(
            self,
            AppError::Generation(GenerationError::InsufficientGeneration { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
