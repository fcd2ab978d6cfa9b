//! 提示词构建：TripRequest → 调研任务 + 行程任务
//!
//! 纯函数，无随机、无 I/O；同一请求总是得到相同文本。行程任务把调研任务声明为上下文依赖。

use crate::crew::{Crew, CrewError, TaskSpec};
use crate::trip::roles::{city_expert, itinerary_planner};
use crate::trip::TripRequest;

pub const RESEARCH_TASK_ID: &str = "research";
pub const ITINERARY_TASK_ID: &str = "itinerary";

const RESEARCH_EXPECTED_OUTPUT: &str =
    "Detailed city information with practical travel tips in a structured format";
const ITINERARY_EXPECTED_OUTPUT: &str =
    "Complete day-by-day itinerary with specific activities, timings, and practical details";

/// 一次请求对应的两份任务说明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTasks {
    pub research: TaskSpec,
    pub itinerary: TaskSpec,
}

impl TripTasks {
    /// 组装成 crew：调研任务在前，行程任务在后
    pub fn into_crew(self, name: impl Into<String>) -> Result<Crew, CrewError> {
        Crew::builder(name)
            .task(self.research)
            .task(self.itinerary)
            .build()
    }
}

pub fn research_description(request: &TripRequest) -> String {
    format!(
        "Research {destination} and provide comprehensive information including:\n\
         - Top 5 must-visit attractions related to: {interests}\n\
         - Best restaurants and local cuisine specialties\n\
         - Cultural highlights and local customs\n\
         - Transportation options within the city\n\
         - Weather considerations\n\
         - Important safety tips\n\
         \n\
         Focus on {budget} budget options and {style} travel style.\n\
         Keep the response concise and practical.",
        destination = request.destination(),
        interests = request.interests_list(),
        budget = request.budget(),
        style = request.travel_style(),
    )
}

pub fn itinerary_description(request: &TripRequest) -> String {
    format!(
        "Create a detailed {days}-day itinerary for a trip from {origin} to {destination}.\n\
         \n\
         Trip details:\n\
         - Dates: {start} to {end}\n\
         - Interests: {interests}\n\
         - Budget: {budget}\n\
         - Travel style: {style}\n\
         \n\
         For each day provide:\n\
         - Morning (9 AM - 12 PM): Activities with specific locations\n\
         - Afternoon (12 PM - 6 PM): Activities with specific locations\n\
         - Evening (6 PM - 10 PM): Activities and dining suggestions\n\
         - Estimated daily cost range\n\
         - Transportation tips between locations\n\
         \n\
         Format it clearly with day numbers and time blocks.\n\
         Make it practical, enjoyable, and realistic!",
        days = request.duration_days(),
        origin = request.origin(),
        destination = request.destination(),
        start = request.start_label(),
        end = request.end_label(),
        interests = request.interests_list(),
        budget = request.budget(),
        style = request.travel_style(),
    )
}

/// 构建两份任务说明
pub fn build_tasks(request: &TripRequest) -> TripTasks {
    let research = TaskSpec::new(
        RESEARCH_TASK_ID,
        research_description(request),
        RESEARCH_EXPECTED_OUTPUT,
        city_expert(),
    );

    let itinerary = TaskSpec::new(
        ITINERARY_TASK_ID,
        itinerary_description(request),
        ITINERARY_EXPECTED_OUTPUT,
        itinerary_planner(),
    )
    .with_context(RESEARCH_TASK_ID);

    tracing::debug!(
        research_chars = research.description.len(),
        itinerary_chars = itinerary.description.len(),
        "Built trip tasks"
    );

    TripTasks { research, itinerary }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::trip::{Budget, TravelStyle};

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

    #[test]
    fn test_itinerary_embeds_trip_details() {
        let tasks = build_tasks(&paris());
        let text = &tasks.itinerary.description;
        for needle in [
            "5-day",
            "New York to Paris",
            "June 01, 2025",
            "June 05, 2025",
            "Food & Dining",
            "Moderate",
            "Balanced",
            "Morning (9 AM - 12 PM)",
            "Estimated daily cost range",
            "Transportation tips",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
        }
    }

    #[test]
    fn test_research_embeds_preferences() {
        let tasks = build_tasks(&paris());
        let text = &tasks.research.description;
        assert!(text.starts_with("Research Paris "));
        assert!(text.contains("related to: Food & Dining"));
        assert!(text.contains("Focus on Moderate budget options and Balanced travel style."));
        assert!(tasks.research.context.is_empty());
        assert_eq!(tasks.research.agent.role, "City Information Expert");
    }

    #[test]
    fn test_itinerary_depends_on_research() {
        let tasks = build_tasks(&paris());
        assert_eq!(tasks.itinerary.context, vec![RESEARCH_TASK_ID.to_string()]);
        assert_eq!(tasks.itinerary.agent.role, "Itinerary Planner");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build_tasks(&paris()), build_tasks(&paris()));
    }

    #[test]
    fn test_every_interest_listed() {
        let req = TripRequest::new(
            "Berlin",
            "Rome",
            NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
            ["History", "Art & Architecture", "Nightlife"],
            Budget::Budget,
            TravelStyle::Packed,
        )
        .unwrap();
        let tasks = build_tasks(&req);
        assert!(tasks.itinerary.description.contains("1-day"));
        assert!(tasks
            .itinerary
            .description
            .contains("- Interests: History, Art & Architecture, Nightlife"));
    }

    #[test]
    fn test_into_crew_keeps_order() {
        let crew = build_tasks(&paris()).into_crew("trip").unwrap();
        let ids: Vec<&str> = crew.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![RESEARCH_TASK_ID, ITINERARY_TASK_ID]);
    }
}
