//! Mock LLM 客户端（用于测试与离线演示，无需 API）
//!
//! 取最后一条 User 消息的首行，拼成确定性的回复，便于本地跑通整条生成流程。

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, Message, Role};

/// Mock 客户端：回显用户最后一条消息的首行
#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| matches!(m.role, Role::User))
            .map(|m| m.content.as_str())
            .unwrap_or("(no input)");

        let headline = last_user
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("(no input)");

        Ok(format!("[mock] {headline}"))
    }
}
