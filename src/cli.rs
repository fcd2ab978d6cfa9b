//! 命令行参数定义

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::trip::{Budget, TravelStyle, TripForm};

/// Trip Planner - AI 行程规划
#[derive(Parser, Debug)]
#[command(
    name = "trip-planner",
    about = "Plan a trip with an AI city expert and itinerary planner",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand (defaults to an interactive session)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one trip plan and print it
    Plan {
        #[command(flatten)]
        form: FormArgs,

        /// Save the plan as trip_plan_<destination>_<date>.txt
        #[arg(long)]
        save: bool,

        /// Directory for --save (defaults to [app].output_dir)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Interactive session: edit the form, generate, download, regenerate
    Session {
        #[command(flatten)]
        form: FormArgs,
    },

    /// List interest categories
    Interests,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 表单字段；未给出的字段用配置中的预填值
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// OpenAI API key (OPENAI_API_KEY takes precedence when set)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Origin city
    #[arg(long)]
    pub origin: Option<String>,

    /// Destination city
    #[arg(long)]
    pub destination: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Interest category, repeatable
    #[arg(long = "interest", value_name = "LABEL")]
    pub interests: Vec<String>,

    /// Budget: budget, moderate, comfortable, luxury
    #[arg(long)]
    pub budget: Option<Budget>,

    /// Travel style: relaxed, balanced, packed
    #[arg(long)]
    pub style: Option<TravelStyle>,
}

impl FormArgs {
    /// 用命令行参数覆盖预填表单
    pub fn apply(&self, mut form: TripForm) -> TripForm {
        if let Some(origin) = &self.origin {
            form.origin = origin.clone();
        }
        if let Some(destination) = &self.destination {
            form.destination = destination.clone();
        }
        if let Some(start) = self.start {
            // 只改出发日时保持原有天数
            if self.end.is_none() {
                let span = form.end_date - form.start_date;
                form.end_date = start + span;
            }
            form.start_date = start;
        }
        if let Some(end) = self.end {
            form.end_date = end;
        }
        if !self.interests.is_empty() {
            form.interests = self.interests.clone();
        }
        if let Some(budget) = self.budget {
            form.budget = budget;
        }
        if let Some(style) = self.style {
            form.travel_style = style;
        }
        form
    }
}
