use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasker_core::config;
use tasker_core::date_key;
use tasker_core::error::AppError;
use tasker_core::model::{Task, TaskStatus};
use tasker_core::task_api::TaskStore;

mod cli;
mod theme;

use cli::{Cli, Command};
use theme::Theme;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn task_row(task: &Task, theme: Theme) -> TaskRow {
    TaskRow {
        text: theme::paint(theme, task.status, &task.text),
        status: task.status.label().to_string(),
    }
}

fn print_tasks_plain(day: &str, tasks: &[Task], theme: Theme) {
    if tasks.is_empty() {
        println!("No tasks for {day}.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(|task| task_row(task, theme)).collect();
    let table = Table::new(rows).with(Style::sharp()).to_string();
    println!("{table}");
}

fn print_tasks_json(day: &str, tasks: &[Task]) -> Result<(), AppError> {
    let payload = serde_json::json!({
        "day": day,
        "tasks": tasks,
    });
    let rendered = serde_json::to_string(&payload)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn print_task_json(day: &str, task: &Task) -> Result<(), AppError> {
    let payload = serde_json::json!({
        "day": day,
        "text": task.text,
        "status": task.status,
    });
    let rendered = serde_json::to_string(&payload)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn resolve_day(day: Option<&str>) -> Result<String, AppError> {
    match day {
        Some(value) => date_key::parse_day(value),
        None => date_key::today_key(),
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_data(message)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = config::load_config_with_fallback().config;
    let theme = theme::resolve_theme(cli.theme.as_deref(), &config)?;
    let mut store = TaskStore::open_default()?;

    match cli.command {
        Command::Add { text, day } => {
            let day = resolve_day(day.as_deref())?;
            let task = store.add_task(&day, &text)?;
            if cli.json {
                print_task_json(&day, &task)?;
            } else {
                println!("Added task: {} ({day})", task.text);
            }
        }
        Command::Status { text, status, day } => {
            let status = TaskStatus::parse_label(&status)
                .ok_or_else(|| AppError::invalid_data(format!("unknown status '{status}'")))?;
            let day = resolve_day(day.as_deref())?;
            let task = store.update_status(&day, &text, status)?;
            if cli.json {
                print_task_json(&day, &task)?;
            } else {
                println!("Marked task '{}' as {} ({day})", task.text, task.status.label());
            }
        }
        Command::Delete { text, day } => {
            let day = resolve_day(day.as_deref())?;
            store.delete_task(&day, &text)?;
            if cli.json {
                let payload = serde_json::json!({ "day": day, "deleted": text.trim() });
                println!("{payload}");
            } else {
                println!("Deleted task: {} ({day})", text.trim());
            }
        }
        Command::Search { query, day } => {
            let day = resolve_day(day.as_deref())?;
            let found: Vec<Task> = store.search(&day, &query).cloned().collect();
            if cli.json {
                print_tasks_json(&day, &found)?;
            } else {
                print_tasks_plain(&day, &found, theme);
            }
        }
        Command::List { day } => {
            let day = resolve_day(day.as_deref())?;
            let tasks = store.tasks_for(&day).to_vec();
            if cli.json {
                print_tasks_json(&day, &tasks)?;
            } else {
                print_tasks_plain(&day, &tasks, theme);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            err.exit();
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
