//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Mock）

pub mod error;
pub mod message;
pub mod mock;
pub mod openai;
pub mod traits;

use std::sync::Arc;

pub use error::LlmError;
pub use message::{Message, Role};
pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, TokenUsage, DEFAULT_MODEL};
pub use traits::LlmClient;

use crate::config::LlmSection;
use crate::core::Credential;

/// 根据配置与凭证创建 LLM 后端（OpenAI 兼容 / Mock）
pub fn create_llm(cfg: &LlmSection, credential: &Credential) -> Arc<dyn LlmClient> {
    match cfg.provider.to_lowercase().as_str() {
        "mock" => {
            tracing::warn!("LLM provider set to mock, no network calls will be made");
            Arc::new(MockLlmClient)
        }
        other => {
            if other != "openai" {
                tracing::warn!("Unknown LLM provider '{}', falling back to OpenAI", other);
            }
            let model = if cfg.model.is_empty() {
                DEFAULT_MODEL
            } else {
                cfg.model.as_str()
            };
            let client = OpenAiClient::new(cfg.base_url.as_deref(), model, credential.expose());
            tracing::info!("Using OpenAI LLM ({})", client.model());
            Arc::new(client)
        }
    }
}
