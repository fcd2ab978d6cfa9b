//! Crew 类型定义
//!
//! 角色（RoleSpec）、任务（TaskSpec）、按提交顺序排列的任务组（Crew）以及执行结果与错误。

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::llm::LlmError;

pub type TaskId = String;

/// 静态角色：role / goal / backstory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl RoleSpec {
    pub fn new(role: impl Into<String>, goal: impl Into<String>, backstory: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// 作为 system 消息发给 LLM 的人设
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

/// 任务说明：描述、期望输出（仅提示用，不做校验）、执行角色、依赖的前置任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSpec {
    pub id: TaskId,
    pub description: String,
    pub expected_output: String,
    pub agent: RoleSpec,
    /// 需要作为上下文注入的前置任务 ID
    pub context: Vec<TaskId>,
}

impl TaskSpec {
    pub fn new(
        id: impl Into<TaskId>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: RoleSpec,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            context: Vec::new(),
        }
    }

    /// 声明依赖某个前置任务的输出
    pub fn with_context(mut self, task_id: impl Into<TaskId>) -> Self {
        self.context.push(task_id.into());
        self
    }
}

/// 一次提交的任务组，任务按声明顺序执行
#[derive(Debug, Clone)]
pub struct Crew {
    pub id: String,
    pub name: String,
    tasks: Vec<TaskSpec>,
}

impl Crew {
    pub fn builder(name: impl Into<String>) -> CrewBuilder {
        CrewBuilder::new(name)
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }
}

/// Crew 构建器：校验任务 ID 唯一、上下文只能引用更早的任务
pub struct CrewBuilder {
    id: String,
    name: String,
    tasks: Vec<TaskSpec>,
}

impl CrewBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("crew_{}", uuid::Uuid::new_v4()),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// 追加任务（顺序即执行顺序）
    pub fn task(mut self, task: TaskSpec) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> Result<Crew, CrewError> {
        if self.tasks.is_empty() {
            return Err(CrewError::InvalidCrew("crew has no tasks".to_string()));
        }

        let mut declared: HashSet<&str> = HashSet::new();
        for task in &self.tasks {
            for dep in &task.context {
                if !declared.contains(dep.as_str()) {
                    return Err(CrewError::InvalidCrew(format!(
                        "task '{}' uses context '{}' which is not an earlier task",
                        task.id, dep
                    )));
                }
            }
            if !declared.insert(task.id.as_str()) {
                return Err(CrewError::InvalidCrew(format!(
                    "duplicate task id '{}'",
                    task.id
                )));
            }
        }

        Ok(Crew {
            id: self.id,
            name: self.name,
            tasks: self.tasks,
        })
    }
}

/// 单个任务的输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutput {
    pub task_id: TaskId,
    pub agent_role: String,
    pub raw: String,
}

/// 一次 kickoff 的结果；raw 为最后一个任务的输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewOutput {
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Crew 执行错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrewError {
    #[error("Invalid crew: {0}")]
    InvalidCrew(String),

    #[error("Task '{task}' failed: {source}")]
    TaskFailed {
        task: TaskId,
        #[source]
        source: LlmError,
    },

    /// 任务调用成功但结果不可用（如空回答）
    #[error("{0}")]
    Execution(String),
}

impl CrewError {
    /// 是否为暂时性错误；仅用于日志，生成流程从不自动重试
    pub fn is_transient(&self) -> bool {
        match self {
            CrewError::TaskFailed { source, .. } => source.is_transient(),
            CrewError::InvalidCrew(_) | CrewError::Execution(_) => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CrewError::InvalidCrew(_) => "invalid_crew",
            CrewError::TaskFailed { source, .. } => source.kind(),
            CrewError::Execution(_) => "execution",
        }
    }
}
