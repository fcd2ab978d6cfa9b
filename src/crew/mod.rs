//! Crew：角色/任务/任务组类型，顺序执行器，外部协作方接口

pub mod backend;
pub mod sequential;
pub mod types;

pub use backend::{CrewBackend, LlmCrewBackend};
pub use sequential::{task_prompt, SequentialCrew};
pub use types::*;
