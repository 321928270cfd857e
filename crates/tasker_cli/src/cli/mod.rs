use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tasker", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color theme for plain output (light or dark)
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task to a day's list
    ///
    /// Example: tasker add "Buy milk"
    /// Example: tasker add "Buy milk" --day 2024-01-01
    Add {
        text: String,
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// Set a task's status (pending or completed)
    ///
    /// Example: tasker status "Buy milk" completed
    Status {
        text: String,
        status: String,
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: tasker delete "Buy milk"
    Delete {
        text: String,
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// Search a day's tasks by case-insensitive substring
    ///
    /// Example: tasker search milk
    Search {
        query: String,
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// List a day's tasks
    ///
    /// Example: tasker list
    /// Example: tasker list --day 2024-01-01
    List {
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<String>,
    },
}
