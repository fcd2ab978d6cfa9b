//! 交互会话
//!
//! readline 循环：用 /set 编辑表单，/generate 生成，/download 保存，/new 清空后重新规划。
//! 单线程：生成期间阻塞等待，SessionState.generating 用于拦截重入。

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::core::{Credential, PlanGenerator, SessionState, ValidationError};
use crate::trip::{TripForm, TripRequest, INTEREST_CATALOG};
use crate::ui::render::{form_overview, save_plan, trip_summary};

/// 生成期间显示的进度提示
const PROGRESS_LINES: &[&str] = &[
    "AI agents are planning your trip...",
    "  City expert is researching your destination...",
    "  Itinerary planner is creating your schedule...",
];

/// 会话命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Generate,
    Show,
    Form,
    Set { field: String, value: String },
    Download(Option<PathBuf>),
    New,
    Interests,
    Help,
    Quit,
}

impl SessionCommand {
    /// 解析一行输入；未知命令返回 Err(提示文本)
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (cmd, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        match cmd {
            "/generate" | "/g" => Ok(SessionCommand::Generate),
            "/show" | "/s" => Ok(SessionCommand::Show),
            "/form" | "/f" => Ok(SessionCommand::Form),
            "/set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f.to_string(), v.trim().to_string()))
                    .unwrap_or_else(|| (rest.to_string(), String::new()));
                if field.is_empty() {
                    Err("Usage: /set <field> <value>".to_string())
                } else {
                    Ok(SessionCommand::Set { field, value })
                }
            }
            "/download" | "/d" => Ok(SessionCommand::Download(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "/new" | "/n" => Ok(SessionCommand::New),
            "/interests" => Ok(SessionCommand::Interests),
            "/help" | "/h" => Ok(SessionCommand::Help),
            "/quit" | "/q" | "/exit" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command '{other}', type /help")),
        }
    }
}

/// 单个用户会话：表单、凭证来源、会话状态
pub struct SessionApp {
    generator: PlanGenerator,
    form: TripForm,
    manual_key: Option<String>,
    output_dir: PathBuf,
    session: SessionState,
    /// 产生当前行程的请求，用于摘要与下载文件名
    planned: Option<TripRequest>,
}

impl SessionApp {
    pub fn new(
        generator: PlanGenerator,
        form: TripForm,
        manual_key: Option<String>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            generator,
            form,
            manual_key,
            output_dir,
            session: SessionState::new(),
            planned: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn form(&self) -> &TripForm {
        &self.form
    }

    /// 校验并生成；生成中再次调用直接忽略
    pub async fn generate(&mut self) -> Result<(), ValidationError> {
        if self.session.is_generating() {
            tracing::warn!("Generation already in progress, ignoring request");
            return Ok(());
        }

        let credential = Credential::from_env_or(self.manual_key.as_deref())?;
        let request = self.form.validate()?;

        self.session.begin_generation();
        for line in PROGRESS_LINES {
            eprintln!("{line}");
        }
        let plan = self.generator.generate_trip_plan(&credential, &request).await;
        self.session.complete_generation(plan);
        self.planned = Some(request);
        Ok(())
    }

    /// 清空当前行程，准备重新规划；返回之前是否有行程
    pub fn new_plan(&mut self) -> bool {
        let had_plan = self.session.has_plan();
        self.session.clear();
        self.planned = None;
        had_plan
    }

    /// 保存当前行程；没有行程时返回 None
    pub fn download(&self, dir: Option<PathBuf>) -> anyhow::Result<Option<PathBuf>> {
        let (Some(plan), Some(request)) = (self.session.trip_plan(), self.planned.as_ref()) else {
            return Ok(None);
        };
        let dir = dir.unwrap_or_else(|| self.output_dir.clone());
        let path = save_plan(&dir, request, plan)
            .with_context(|| format!("Failed to save trip plan under {}", dir.display()))?;
        Ok(Some(path))
    }

    /// 修改表单字段
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "origin" => self.form.origin = value.to_string(),
            "destination" | "dest" => self.form.destination = value.to_string(),
            "start" => self.form.start_date = parse_date(value)?,
            "end" => self.form.end_date = parse_date(value)?,
            "interests" => {
                self.form.interests = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            "budget" => self.form.budget = value.parse().map_err(|e: ValidationError| e.to_string())?,
            "style" => {
                self.form.travel_style = value.parse().map_err(|e: ValidationError| e.to_string())?
            }
            other => return Err(format!("Unknown field '{other}'")),
        }
        Ok(())
    }

    fn render_plan(&self) -> String {
        match (self.session.trip_plan(), self.planned.as_ref()) {
            (Some(plan), Some(request)) => format!(
                "Your personalized trip plan is ready!\n\n{}\n\n{}\n",
                trip_summary(request),
                plan
            ),
            _ => "No trip plan yet. Use /generate.".to_string(),
        }
    }

    /// 处理一条命令；返回 false 表示退出
    pub async fn handle(&mut self, command: SessionCommand) -> anyhow::Result<bool> {
        match command {
            SessionCommand::Generate => match self.generate().await {
                Ok(()) => println!("{}", self.render_plan()),
                Err(e) => println!("{e}"),
            },
            SessionCommand::Show => println!("{}", self.render_plan()),
            SessionCommand::Form => println!("{}", form_overview(&self.form)),
            SessionCommand::Set { field, value } => match self.set_field(&field, &value) {
                Ok(()) => println!("{}", form_overview(&self.form)),
                Err(e) => println!("{e}"),
            },
            SessionCommand::Download(dir) => match self.download(dir)? {
                Some(path) => println!("Saved {}", path.display()),
                None => println!("No trip plan to download yet."),
            },
            SessionCommand::New => {
                if self.new_plan() {
                    println!("Plan cleared. Adjust the form with /set, then /generate.");
                } else {
                    println!("No trip plan to clear. Adjust the form with /set, then /generate.");
                }
            }
            SessionCommand::Interests => println!("{}", INTEREST_CATALOG.join("\n")),
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// readline 主循环
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("AI-Powered Trip Planner");
        println!("{}\n", form_overview(&self.form));
        println!("Type /help for commands, /generate to plan, /quit to exit.");

        let mut rl = DefaultEditor::new().context("Failed to initialize readline")?;

        loop {
            match rl.readline("trip> ") {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match SessionCommand::parse(input) {
                        Ok(cmd) => {
                            if !self.handle(cmd).await? {
                                break;
                            }
                        }
                        Err(msg) => println!("{msg}"),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => return Err(err).context("Readline error"),
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{value}' (expected YYYY-MM-DD): {e}"))
}

fn print_help() {
    println!("/generate            generate a trip plan from the form");
    println!("/show                show the current plan");
    println!("/form                show the form");
    println!("/set <field> <value> fields: origin, destination, start, end, interests, budget, style");
    println!("/download [dir]      save the plan as a text file");
    println!("/new                 clear the plan and start over");
    println!("/interests           list interest categories");
    println!("/quit                exit");
}
