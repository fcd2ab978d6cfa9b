//! 行程请求：表单原始值 TripForm 与校验后的 TripRequest
//!
//! TripForm 对应界面上可编辑的字段；validate 通过后得到不可变的 TripRequest，每次生成都重新构造。

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::DefaultsSection;
use crate::core::ValidationError;

/// 界面可选的兴趣类别
pub const INTEREST_CATALOG: &[&str] = &[
    "Culture & Museums",
    "Food & Dining",
    "Adventure & Sports",
    "Nature & Parks",
    "Shopping",
    "Nightlife",
    "History",
    "Beach & Water Activities",
    "Art & Architecture",
];

/// 默认勾选的兴趣
pub const DEFAULT_INTERESTS: &[&str] = &["Culture & Museums", "Food & Dining"];

/// 展示日期格式，如 "June 01, 2025"
pub const DATE_LABEL_FORMAT: &str = "%B %d, %Y";

/// 预算档位（有序：Budget < Moderate < Comfortable < Luxury）
///
/// 配置文件与命令行一样走 `FromStr`，大小写不敏感。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Budget {
    Budget,
    #[default]
    Moderate,
    Comfortable,
    Luxury,
}

impl Budget {
    pub const ALL: [Budget; 4] = [
        Budget::Budget,
        Budget::Moderate,
        Budget::Comfortable,
        Budget::Luxury,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Budget => "Budget",
            Budget::Moderate => "Moderate",
            Budget::Comfortable => "Comfortable",
            Budget::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Budget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Budget::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "budget",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Budget {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 旅行节奏
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TravelStyle {
    Relaxed,
    #[default]
    Balanced,
    Packed,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 3] = [TravelStyle::Relaxed, TravelStyle::Balanced, TravelStyle::Packed];

    pub fn label(&self) -> &'static str {
        match self {
            TravelStyle::Relaxed => "Relaxed",
            TravelStyle::Balanced => "Balanced",
            TravelStyle::Packed => "Packed",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TravelStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelStyle::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "travel style",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for TravelStyle {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 按 (end - start) + 1 计算天数；end 早于 start 时结果 < 1
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(i64::from(days)))
}

/// 表单当前值（未校验）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripForm {
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: Vec<String>,
    pub budget: Budget,
    pub travel_style: TravelStyle,
}

impl TripForm {
    /// 用配置中的预填值构造表单：出发日 = today + offset，结束日 = 出发日 + (天数 - 1)
    ///
    /// 偏移超出日期范围时退回默认偏移；天数超出范围时结束日取出发日。
    pub fn from_defaults(defaults: &DefaultsSection, today: NaiveDate) -> Self {
        let start_date = add_days(today, defaults.start_offset_days).unwrap_or_else(|| {
            let fallback = DefaultsSection::default().start_offset_days;
            tracing::warn!(
                "start_offset_days {} out of range, using {}",
                defaults.start_offset_days,
                fallback
            );
            add_days(today, fallback).unwrap_or(today)
        });
        let end_date = add_days(start_date, defaults.trip_length_days.max(1) - 1).unwrap_or_else(|| {
            tracing::warn!("trip_length_days {} out of range, using 1", defaults.trip_length_days);
            start_date
        });
        Self {
            origin: defaults.origin.clone(),
            destination: defaults.destination.clone(),
            start_date,
            end_date,
            interests: defaults.interests.clone(),
            budget: defaults.budget,
            travel_style: defaults.travel_style,
        }
    }

    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    /// 校验顺序：出发地/目的地 → 兴趣 → 日期
    pub fn validate(&self) -> Result<TripRequest, ValidationError> {
        TripRequest::new(
            &self.origin,
            &self.destination,
            self.start_date,
            self.end_date,
            self.interests.iter(),
            self.budget,
            self.travel_style,
        )
    }
}

/// 校验后的行程请求，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    origin: String,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    interests: Vec<String>,
    budget: Budget,
    travel_style: TravelStyle,
}

impl TripRequest {
    pub fn new<I, S>(
        origin: &str,
        destination: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interests: I,
        budget: Budget,
        travel_style: TravelStyle,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(ValidationError::MissingCities);
        }

        // 去重保序：同一兴趣只出现一次
        let mut selected: Vec<String> = Vec::new();
        for interest in interests {
            let label = interest.as_ref().trim();
            if !label.is_empty() && !selected.iter().any(|s| s == label) {
                selected.push(label.to_string());
            }
        }
        if selected.is_empty() {
            return Err(ValidationError::NoInterests);
        }

        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            start_date,
            end_date,
            interests: selected,
            budget,
            travel_style,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn travel_style(&self) -> TravelStyle {
        self.travel_style
    }

    /// 含首尾两天，校验保证 ≥ 1
    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    /// 兴趣以 ", " 拼接，用于提示词与展示
    pub fn interests_list(&self) -> String {
        self.interests.join(", ")
    }

    pub fn start_label(&self) -> String {
        self.start_date.format(DATE_LABEL_FORMAT).to_string()
    }

    pub fn end_label(&self) -> String {
        self.end_date.format(DATE_LABEL_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paris() -> TripRequest {
        TripRequest::new(
            "New York",
            "Paris",
            date(2025, 6, 1),
            date(2025, 6, 5),
            ["Food & Dining"],
            Budget::Moderate,
            TravelStyle::Balanced,
        )
        .unwrap()
    }

    #[test]
    fn test_duration_days_inclusive() {
        assert_eq!(paris().duration_days(), 5);
        assert_eq!(duration_days(date(2025, 6, 1), date(2025, 6, 1)), 1);
        assert_eq!(duration_days(date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_date_labels() {
        let req = paris();
        assert_eq!(req.start_label(), "June 01, 2025");
        assert_eq!(req.end_label(), "June 05, 2025");
    }

    #[test]
    fn test_missing_cities() {
        let err = TripRequest::new(
            "  ",
            "Paris",
            date(2025, 6, 1),
            date(2025, 6, 5),
            ["History"],
            Budget::Budget,
            TravelStyle::Relaxed,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingCities);
    }

    #[test]
    fn test_no_interests() {
        let err = TripRequest::new(
            "New York",
            "Paris",
            date(2025, 6, 1),
            date(2025, 6, 5),
            Vec::<String>::new(),
            Budget::Budget,
            TravelStyle::Relaxed,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NoInterests);
    }

    #[test]
    fn test_end_before_start() {
        let err = TripRequest::new(
            "New York",
            "Paris",
            date(2025, 6, 5),
            date(2025, 6, 1),
            ["History"],
            Budget::Budget,
            TravelStyle::Relaxed,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_interests_deduplicated_in_order() {
        let req = TripRequest::new(
            " Lisbon ",
            "Porto",
            date(2025, 9, 1),
            date(2025, 9, 3),
            ["Nightlife", "History", "Nightlife", " "],
            Budget::Luxury,
            TravelStyle::Packed,
        )
        .unwrap();
        assert_eq!(req.origin(), "Lisbon");
        assert_eq!(req.interests_list(), "Nightlife, History");
    }

    #[test]
    fn test_budget_order_and_parse() {
        assert!(Budget::Budget < Budget::Moderate);
        assert!(Budget::Comfortable < Budget::Luxury);
        assert_eq!("luxury".parse::<Budget>().unwrap(), Budget::Luxury);
        assert_eq!("PACKED".parse::<TravelStyle>().unwrap(), TravelStyle::Packed);
        assert!("cheap".parse::<Budget>().is_err());
    }

    #[test]
    fn test_form_from_defaults() {
        let today = date(2025, 5, 1);
        let form = TripForm::from_defaults(&DefaultsSection::default(), today);
        assert_eq!(form.start_date, date(2025, 5, 8));
        assert_eq!(form.end_date, date(2025, 5, 13));
        assert_eq!(form.duration_days(), 6);
        let req = form.validate().unwrap();
        assert_eq!(req.interests_list(), "Culture & Museums, Food & Dining");
        assert_eq!(req.budget(), Budget::Moderate);
    }

    #[test]
    fn test_form_from_defaults_out_of_range() {
        let today = date(2025, 5, 1);
        let defaults = DefaultsSection {
            start_offset_days: u32::MAX,
            ..Default::default()
        };
        let form = TripForm::from_defaults(&defaults, today);
        assert_eq!(form.start_date, date(2025, 5, 8));

        let defaults = DefaultsSection {
            trip_length_days: u32::MAX,
            ..Default::default()
        };
        let form = TripForm::from_defaults(&defaults, today);
        assert_eq!(form.end_date, form.start_date);
    }

    #[test]
    fn test_enums_deserialize_any_case() {
        assert_eq!(serde_json::from_str::<Budget>(r#""luxury""#).unwrap(), Budget::Luxury);
        assert_eq!(
            serde_json::from_str::<TravelStyle>(r#""RELAXED""#).unwrap(),
            TravelStyle::Relaxed
        );
        assert!(serde_json::from_str::<Budget>(r#""cheap""#).is_err());
        assert_eq!(serde_json::to_string(&Budget::Comfortable).unwrap(), r#""Comfortable""#);
    }
}
