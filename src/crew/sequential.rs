//! 顺序执行 Crew
//!
//! 按声明顺序逐个执行任务：每个任务一次 LLM 调用（system = 角色人设，user = 任务说明 + 期望输出 + 上下文）。
//! 任务声明的上下文取自前置任务的输出；任一任务失败（含空回答）即停止，不重试。

use std::collections::HashMap;
use std::sync::Arc;

use crate::crew::{Crew, CrewError, CrewOutput, TaskOutput, TaskSpec};
use crate::llm::{LlmClient, Message};

/// 拼接单个任务的 user 消息
pub fn task_prompt(task: &TaskSpec, context: &[(&str, &str)]) -> String {
    let mut prompt = format!(
        "Current Task: {}\n\nThis is the expected criteria for your final answer: {}",
        task.description, task.expected_output
    );

    if !context.is_empty() {
        prompt.push_str("\n\nThis is the context you're working with:");
        for (task_id, output) in context {
            prompt.push_str(&format!("\n\n--- Output of task '{task_id}' ---\n{output}"));
        }
    }

    prompt.push_str("\n\nBegin! Give your best final answer.");
    prompt
}

/// 顺序 Crew 执行器：持有一个 LLM 客户端，对每个任务调用一次
pub struct SequentialCrew {
    llm: Arc<dyn LlmClient>,
}

impl SequentialCrew {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn run(&self, crew: &Crew) -> Result<CrewOutput, CrewError> {
        tracing::info!(crew = %crew.name, id = %crew.id, tasks = crew.tasks().len(), "Crew kickoff");

        let mut outputs: HashMap<&str, String> = HashMap::new();
        let mut tasks_output = Vec::with_capacity(crew.tasks().len());

        for task in crew.tasks() {
            let messages = {
                let context: Vec<(&str, &str)> = task
                    .context
                    .iter()
                    .filter_map(|dep| outputs.get(dep.as_str()).map(|o| (dep.as_str(), o.as_str())))
                    .collect();
                vec![
                    Message::system(task.agent.system_prompt()),
                    Message::user(task_prompt(task, &context)),
                ]
            };

            tracing::info!(task = %task.id, agent = %task.agent.role, "Task started");
            let raw = self
                .llm
                .complete(&messages)
                .await
                .map_err(|source| CrewError::TaskFailed {
                    task: task.id.clone(),
                    source,
                })?;
            if raw.trim().is_empty() {
                return Err(CrewError::Execution(format!(
                    "Task '{}' returned an empty answer",
                    task.id
                )));
            }
            tracing::info!(task = %task.id, chars = raw.len(), "Task completed");

            tasks_output.push(TaskOutput {
                task_id: task.id.clone(),
                agent_role: task.agent.role.clone(),
                raw: raw.clone(),
            });
            outputs.insert(task.id.as_str(), raw);
        }

        let (prompt_tokens, completion_tokens, total_tokens) = self.llm.token_usage();
        tracing::info!(prompt_tokens, completion_tokens, total_tokens, "Crew finished");

        let raw = tasks_output
            .last()
            .map(|t| t.raw.clone())
            .unwrap_or_default();

        Ok(CrewOutput { raw, tasks_output })
    }
}
