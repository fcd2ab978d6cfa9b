//! 模型服务凭证
//!
//! 环境变量 OPENAI_API_KEY 非空时优先于手动输入；空白值视为未提供。

use std::fmt;

use crate::core::ValidationError;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// API Key；Debug 输出脱敏
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 去除首尾空白，空串返回 None
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// env 优先，其次 manual；两者都缺失时报 MissingCredential
    pub fn resolve(env: Option<&str>, manual: Option<&str>) -> Result<Self, ValidationError> {
        env.and_then(Self::new)
            .or_else(|| manual.and_then(Self::new))
            .ok_or(ValidationError::MissingCredential)
    }

    /// 从进程环境读取 OPENAI_API_KEY 后按 resolve 规则解析
    pub fn from_env_or(manual: Option<&str>) -> Result<Self, ValidationError> {
        let env = std::env::var(API_KEY_ENV).ok();
        Self::resolve(env.as_deref(), manual)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
