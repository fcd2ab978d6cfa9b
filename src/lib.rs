//! Trip Planner - AI 行程规划
//!
//! 模块划分：
//! - **cli**: 命令行参数
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 输入校验、凭证、会话状态、行程生成器
//! - **crew**: 角色/任务/任务组、顺序执行器、外部协作方接口
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **observability**: 日志初始化
//! - **trip**: 行程请求、固定角色、提示词构建
//! - **ui**: 交互会话与文本渲染

pub mod cli;
pub mod config;
pub mod core;
pub mod crew;
pub mod llm;
pub mod observability;
pub mod trip;
pub mod ui;

pub use crate::core::{Credential, PlanGenerator, SessionState};
pub use crate::trip::{Budget, TravelStyle, TripForm, TripRequest};
