//! 核心层：输入校验错误、凭证、会话状态、行程生成

pub mod credential;
pub mod error;
pub mod generator;
pub mod session;

pub use credential::{Credential, API_KEY_ENV};
pub use error::ValidationError;
pub use generator::{assemble_crew, failure_message, PlanGenerator, REMEDIATION_HINT};
pub use session::SessionState;
