//! 行程领域：请求与校验、固定角色、提示词构建

pub mod prompt;
pub mod request;
pub mod roles;

pub use prompt::{build_tasks, TripTasks, ITINERARY_TASK_ID, RESEARCH_TASK_ID};
pub use request::{
    duration_days, Budget, TravelStyle, TripForm, TripRequest, DATE_LABEL_FORMAT,
    DEFAULT_INTERESTS, INTEREST_CATALOG,
};
