//! 外部执行协作方接口
//!
//! CrewBackend 只有一个操作：带凭证提交一个 crew，返回最终文本或错误。默认实现 LlmCrewBackend
//! 在 kickoff 内用当次凭证创建 LLM 客户端并顺序执行，调用结束即释放凭证。

use async_trait::async_trait;

use crate::config::LlmSection;
use crate::core::Credential;
use crate::crew::{Crew, CrewError, CrewOutput, SequentialCrew};
use crate::llm::create_llm;

#[async_trait]
pub trait CrewBackend: Send + Sync {
    async fn kickoff(&self, credential: &Credential, crew: &Crew) -> Result<CrewOutput, CrewError>;
}

/// 基于 LLM 的默认协作方
#[derive(Debug, Clone, Default)]
pub struct LlmCrewBackend {
    llm: LlmSection,
}

impl LlmCrewBackend {
    pub fn new(llm: LlmSection) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CrewBackend for LlmCrewBackend {
    async fn kickoff(&self, credential: &Credential, crew: &Crew) -> Result<CrewOutput, CrewError> {
        let llm = create_llm(&self.llm, credential);
        SequentialCrew::new(llm).run(crew).await
    }
}
