//! LLM 调用错误
//!
//! 后端返回的错误统一按文本归类：鉴权、限流、网络、模型/API。归类只用于日志与展示，不触发重试。

use thiserror::Error;

/// 单次 LLM 调用失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model error: {0}")]
    Api(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// 根据后端错误文本归类（async-openai 的错误最终都是可读文本）
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("quota")
            || lower.contains("too many requests")
        {
            LlmError::RateLimited(message)
        } else if lower.contains("api key")
            || lower.contains("401")
            || lower.contains("unauthorized")
            || lower.contains("authentication")
        {
            LlmError::Authentication(message)
        } else if lower.contains("timed out")
            || lower.contains("timeout")
            || lower.contains("connection")
            || lower.contains("dns")
        {
            LlmError::Network(message)
        } else {
            LlmError::Api(message)
        }
    }

    /// 是否为暂时性错误（稍后重试可能成功）
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::RateLimited(_) | LlmError::Network(_))
    }

    /// 错误类别名，用于日志字段
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Authentication(_) => "authentication",
            LlmError::RateLimited(_) => "rate_limited",
            LlmError::Network(_) => "network",
            LlmError::Api(_) => "model",
            LlmError::InvalidRequest(_) => "invalid_request",
        }
    }
}
