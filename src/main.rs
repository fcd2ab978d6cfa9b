//! Trip Planner 入口：初始化日志、加载配置，执行 plan / session / interests。

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use trip_planner::cli::{Cli, Command, OutputFormat};
use trip_planner::config::{load_config, AppConfig};
use trip_planner::core::{Credential, PlanGenerator};
use trip_planner::trip::{TripForm, TripRequest, INTEREST_CATALOG};
use trip_planner::ui::{save_plan, trip_summary, SessionApp};

/// --format json 的输出
#[derive(Serialize)]
struct PlanReport<'a> {
    request: &'a TripRequest,
    duration_days: i64,
    plan: &'a str,
    saved_to: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    trip_planner::observability::init(cli.verbose);

    let cfg = load_config(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    let today = chrono::Local::now().date_naive();
    let base_form = TripForm::from_defaults(&cfg.defaults, today);
    let generator = PlanGenerator::from_config(&cfg);

    match cli.command {
        Some(Command::Plan {
            form,
            save,
            output_dir,
            format,
        }) => {
            let credential = Credential::from_env_or(form.api_key.as_deref())?;
            let request = form.apply(base_form).validate()?;

            eprintln!("AI agents are planning your trip to {}...", request.destination());
            let plan = generator.generate_trip_plan(&credential, &request).await;

            let saved_to = if save {
                let dir = output_dir.unwrap_or_else(|| cfg.app.output_dir());
                Some(
                    save_plan(&dir, &request, &plan)
                        .with_context(|| format!("Failed to save trip plan under {}", dir.display()))?,
                )
            } else {
                None
            };

            match format {
                OutputFormat::Text => {
                    println!("{}\n\n{}", trip_summary(&request), plan);
                    if let Some(path) = &saved_to {
                        eprintln!("Saved {}", path.display());
                    }
                }
                OutputFormat::Json => {
                    let report = PlanReport {
                        request: &request,
                        duration_days: request.duration_days(),
                        plan: &plan,
                        saved_to: saved_to.map(|p| p.display().to_string()),
                    };
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report).context("Failed to encode report")?
                    );
                }
            }
        }
        Some(Command::Interests) => {
            for interest in INTEREST_CATALOG {
                println!("{interest}");
            }
        }
        Some(Command::Session { form }) => {
            let mut app = SessionApp::new(
                generator,
                form.apply(base_form),
                form.api_key.clone(),
                cfg.app.output_dir(),
            );
            app.run().await.context("Session failed")?;
        }
        None => {
            let mut app = SessionApp::new(generator, base_form, None, cfg.app.output_dir());
            app.run().await.context("Session failed")?;
        }
    }

    Ok(())
}
