//! 输入校验错误
//!
//! 在调用生成流程之前检出；文本与界面提示一致。

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your OpenAI API key (or set OPENAI_API_KEY).")]
    MissingCredential,

    #[error("Please enter both origin and destination cities.")]
    MissingCities,

    #[error("Please select at least one interest.")]
    NoInterests,

    #[error("End date {end} is before start date {start}.")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },
}
