use anyhow::{bail, Result};
use captains_log::domain::{format_hours, MonthChoice};
use captains_log::persistence::resolve_root;
use captains_log::report::total_hours;
use captains_log::{LogSession, Logbook};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "captains-log")]
#[command(about = "A daily task log with quick-entry tags and weekly/account summaries", long_about = None)]
struct Cli {
    /// Data folder. Defaults to $CAPTAINS_LOG_DIR, then ~/Desktop/Captains_Log
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the tasks logged for a day
    Show {
        /// Date (YYYY-MM-DD). Defaults to today.
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Add tasks, one per line: "Fix bug #infra @2.5". Reads stdin when no text is given.
    Add {
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        text: Vec<String>,
    },
    /// Mark tasks as complete
    Complete {
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Task numbers as shown by `show`
        #[arg(required = true)]
        tasks: Vec<usize>,
    },
    /// Mark tasks as incomplete
    Incomplete {
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(required = true)]
        tasks: Vec<usize>,
    },
    /// Flip the status of tasks
    Toggle {
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(required = true)]
        tasks: Vec<usize>,
    },
    /// Delete tasks
    Delete {
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(required = true)]
        tasks: Vec<usize>,
    },
    /// Set the hours spent on a task
    SetTime {
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        task: usize,
        hours: String,
    },
    /// List the days that have a log
    Dates,
    /// Write a summary of the last seven days
    Weekly,
    /// Write a per-account summary for this or last month
    Accounts {
        /// "this" or "last"
        #[arg(short, long, default_value = "this")]
        month: String,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = resolve_root(cli.root)?;
    let logbook = Logbook::open(root)?;

    if logbook.ensure_folders()? {
        print_welcome(&logbook);
    }

    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Commands::Show { date: None }) {
        Commands::Show { date } => {
            let date = date.unwrap_or(today);
            let session = match LogSession::open(logbook.clone(), date) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    LogSession::empty(logbook, date)
                }
            };
            print_tasks(&session);
            Ok(())
        }
        Commands::Add { date, text } => {
            let text = if text.is_empty() {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                text.join(" ")
            };

            let mut session = LogSession::open(logbook, date.unwrap_or(today))?;
            let outcome = session.add_quick_entries(&text)?;
            if outcome.added == 0 {
                println!("Nothing to add.");
                return Ok(());
            }

            print_tasks(&session);
            if outcome.created_file {
                println!();
                println!(
                    "A new Log file was created for {}.",
                    session.date().format("%B %d, %Y")
                );
            }
            Ok(())
        }
        Commands::Complete { date, tasks } => {
            let mut session = LogSession::open(logbook, date.unwrap_or(today))?;
            session.set_complete(&to_indices(&tasks)?, true)?;
            print_tasks(&session);
            Ok(())
        }
        Commands::Incomplete { date, tasks } => {
            let mut session = LogSession::open(logbook, date.unwrap_or(today))?;
            session.set_complete(&to_indices(&tasks)?, false)?;
            print_tasks(&session);
            Ok(())
        }
        Commands::Toggle { date, tasks } => {
            let mut session = LogSession::open(logbook, date.unwrap_or(today))?;
            session.toggle_status(&to_indices(&tasks)?)?;
            print_tasks(&session);
            Ok(())
        }
        Commands::Delete { date, tasks } => {
            let mut session = LogSession::open(logbook, date.unwrap_or(today))?;
            let removed = session.delete(&to_indices(&tasks)?)?;
            println!("Deleted {} task(s).", removed);
            print_tasks(&session);
            Ok(())
        }
        Commands::SetTime { date, task, hours } => {
            let mut session = LogSession::open(logbook, date.unwrap_or(today))?;
            session.set_time(to_index(task)?, &hours)?;
            println!("Log saved.");
            print_tasks(&session);
            Ok(())
        }
        Commands::Dates => {
            for date in logbook.log_dates()? {
                println!("{}", date);
            }
            Ok(())
        }
        Commands::Weekly => {
            let path = logbook.build_weekly_summary(today)?;
            println!("Weekly summary saved:");
            println!("{}", path.display());
            Ok(())
        }
        Commands::Accounts { month } => {
            let Some(choice) = MonthChoice::from_word(&month) else {
                bail!("Unknown month \"{}\". Use \"this\" or \"last\".", month);
            };

            match logbook.build_account_summary(choice, today)? {
                Some(path) => {
                    println!("Account summary saved:");
                    println!("{}", path.display());
                }
                None => println!("Account summary cancelled."),
            }
            Ok(())
        }
    }
}

/// Task numbers on the command line start at 1
fn to_index(number: usize) -> Result<usize> {
    match number.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Task numbers start at 1"),
    }
}

fn to_indices(numbers: &[usize]) -> Result<Vec<usize>> {
    numbers.iter().map(|n| to_index(*n)).collect()
}

fn print_tasks(session: &LogSession) {
    println!("{}", session.date().format("%A, %B %d, %Y"));

    if session.tasks().is_empty() {
        println!("  (no tasks)");
        return;
    }

    for (number, task) in session.tasks().iter().enumerate() {
        println!(
            "{:>3}. {} {}  Hours Spent: {}",
            number + 1,
            task.status_icon(),
            task,
            task.time
        );
    }
    println!(
        "     Total: {}h",
        format_hours(total_hours(session.tasks()))
    );
}

fn print_welcome(logbook: &Logbook) {
    println!("Welcome to Captain's Log!");
    println!();
    println!("Your logs live in:      {}", logbook.logs_dir().display());
    println!("Summaries are saved to: {}", logbook.summaries_dir().display());
    println!();
    println!("Add tasks one per line, tagging an account with #TAG and hours with @HOURS:");
    println!("  captains-log add \"Fix bug #infra @2.5\"");
    println!();
}
