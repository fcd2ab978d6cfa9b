//! 行程生成器
//!
//! 每次用户发起生成时：构建两个任务 → 组装 crew → 调用协作方 kickoff 一次。
//! 协作方的任何错误都转成一段带固定提示的文本返回，不向上抛，也不重试。

use std::fmt::Display;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::core::{Credential, ValidationError};
use crate::crew::{Crew, CrewBackend, CrewError, CrewOutput, LlmCrewBackend};
use crate::trip::{build_tasks, Budget, TravelStyle, TripRequest};

/// 失败时附带的处理建议
pub const REMEDIATION_HINT: &str = "Please check your OpenAI API key and try again.";

/// 把错误转成展示给用户的文本
pub fn failure_message(err: &dyn Display) -> String {
    format!("Error generating trip plan: {err}\n\n{REMEDIATION_HINT}")
}

/// 由请求组装 crew：调研任务在前，行程任务在后
pub fn assemble_crew(request: &TripRequest) -> Result<Crew, CrewError> {
    build_tasks(request).into_crew(format!("trip to {}", request.destination()))
}

pub struct PlanGenerator {
    backend: Arc<dyn CrewBackend>,
}

impl PlanGenerator {
    pub fn new(backend: Arc<dyn CrewBackend>) -> Self {
        Self { backend }
    }

    /// 默认协作方：按 [llm] 配置创建的 LlmCrewBackend
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(Arc::new(LlmCrewBackend::new(cfg.llm.clone())))
    }

    /// 未拍平的结果，供需要区分错误类别的调用方使用
    pub async fn try_generate(
        &self,
        credential: &Credential,
        request: &TripRequest,
    ) -> Result<CrewOutput, CrewError> {
        let crew = assemble_crew(request)?;
        self.backend.kickoff(credential, &crew).await
    }

    /// 生成行程文本；失败时返回错误说明 + 固定提示
    pub async fn generate_trip_plan(&self, credential: &Credential, request: &TripRequest) -> String {
        tracing::info!(
            origin = request.origin(),
            destination = request.destination(),
            days = request.duration_days(),
            "Generating trip plan"
        );

        match self.try_generate(credential, request).await {
            Ok(output) => output.raw,
            Err(e) => {
                tracing::warn!(kind = e.kind(), transient = e.is_transient(), "Trip plan generation failed: {}", e);
                failure_message(&e)
            }
        }
    }

    /// 以表单原始字段调用：先校验（凭证 → 城市 → 兴趣 → 日期），通过后生成
    #[allow(clippy::too_many_arguments)]
    pub async fn generate_trip_plan_from_parts(
        &self,
        credential: Option<&str>,
        origin: &str,
        destination: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interests: &[String],
        budget: Budget,
        travel_style: TravelStyle,
    ) -> Result<String, ValidationError> {
        let credential = Credential::from_env_or(credential)?;
        let request = TripRequest::new(
            origin,
            destination,
            start_date,
            end_date,
            interests,
            budget,
            travel_style,
        )?;
        Ok(self.generate_trip_plan(&credential, &request).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::llm::LlmError;
    use crate::trip::{ITINERARY_TASK_ID, RESEARCH_TASK_ID};

    /// 记录调用次数与收到的任务顺序，按需返回成功或失败
    struct RecordingBackend {
        calls: AtomicUsize,
        order: std::sync::Mutex<Vec<String>>,
        fail_with: Option<CrewError>,
    }

    impl RecordingBackend {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                order: std::sync::Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(err: CrewError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::ok()
            }
        }
    }

    #[async_trait]
    impl CrewBackend for RecordingBackend {
        async fn kickoff(&self, credential: &Credential, crew: &Crew) -> Result<CrewOutput, CrewError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.order.lock().unwrap() = crew.tasks().iter().map(|t| t.id.clone()).collect();
            assert_eq!(credential.expose(), "sk-test");
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(CrewOutput {
                    raw: "Day 1: Eiffel Tower".to_string(),
                    tasks_output: Vec::new(),
                }),
            }
        }
    }

    fn paris() -> TripRequest {
        TripRequest::new(
            "New York",
            "Paris",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            ["Food & Dining"],
            Budget::Moderate,
            TravelStyle::Balanced,
        )
        .unwrap()
    }

    fn key() -> Credential {
        Credential::new("sk-test").unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_raw_text_once() {
        let backend = Arc::new(RecordingBackend::ok());
        let generator = PlanGenerator::new(backend.clone());

        let plan = generator.generate_trip_plan(&key(), &paris()).await;

        assert_eq!(plan, "Day 1: Eiffel Tower");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *backend.order.lock().unwrap(),
            vec![RESEARCH_TASK_ID.to_string(), ITINERARY_TASK_ID.to_string()]
        );
    }

    #[tokio::test]
    async fn test_failure_is_flattened_with_hint() {
        let backend = Arc::new(RecordingBackend::failing(CrewError::TaskFailed {
            task: RESEARCH_TASK_ID.to_string(),
            source: LlmError::classify("rate limit"),
        }));
        let generator = PlanGenerator::new(backend.clone());

        let plan = generator.generate_trip_plan(&key(), &paris()).await;

        assert!(plan.starts_with("Error generating trip plan: "));
        assert!(plan.contains("rate limit"));
        assert!(plan.ends_with(REMEDIATION_HINT));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_try_generate_keeps_error_kind() {
        let backend = Arc::new(RecordingBackend::failing(CrewError::TaskFailed {
            task: ITINERARY_TASK_ID.to_string(),
            source: LlmError::classify("Incorrect API key provided"),
        }));
        let err = PlanGenerator::new(backend)
            .try_generate(&key(), &paris())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "authentication");
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_from_parts_validates_before_kickoff() {
        let backend = Arc::new(RecordingBackend::ok());
        let generator = PlanGenerator::new(backend.clone());

        let err = generator
            .generate_trip_plan_from_parts(
                Some("sk-test"),
                "New York",
                "Paris",
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
                &[],
                Budget::Moderate,
                TravelStyle::Balanced,
            )
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::NoInterests);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_message_shape() {
        assert_eq!(
            failure_message(&"boom"),
            "Error generating trip plan: boom\n\nPlease check your OpenAI API key and try again."
        );
    }
}
