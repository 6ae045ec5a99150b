//! taskstore CLI
//!
//! Offline administration of a task file. Talks to the file through
//! `FileTaskStore`, so do not point it at a file a running server owns.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use taskstore::config::resolve_data_file;
use taskstore::{FileTaskStore, Task, TaskInput, TaskStore};

/// taskstore CLI
#[derive(Parser, Debug)]
#[command(name = "taskstore-cli")]
#[command(about = "Inspect and edit a taskstore data file")]
struct Args {
    /// Backing JSON file (same resolution as the server when omitted)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all tasks
    List,

    /// Show one task
    Show {
        id: i64,
    },

    /// Add a task
    Add {
        title: String,

        /// Create it already done
        #[arg(long)]
        done: bool,
    },

    /// Mark a task done
    Done {
        id: i64,
    },

    /// Mark a task not done
    Undone {
        id: i64,
    },

    /// Change a task's title
    Rename {
        id: i64,
        title: String,
    },

    /// Delete a task
    Del {
        id: i64,
    },
}

enum Outcome {
    Tasks(Vec<Task>),
    Task(Task),
    Deleted(i64),
    NotFound(i64),
    Invalid(&'static str),
}

fn main() -> ExitCode {
    let args = Args::parse();
    let path = args.data_file.clone().unwrap_or_else(resolve_data_file);

    let store = match FileTaskStore::open_path(&path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: cannot open {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match execute(&store, args.command) {
        Ok(outcome) => report(outcome, args.json),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(store: &FileTaskStore, command: Commands) -> taskstore::Result<Outcome> {
    let outcome = match command {
        Commands::List => Outcome::Tasks(store.find_all()?),
        Commands::Show { id } => found(id, store.find_by_id(id)?),
        Commands::Add { title, done } => {
            let input = TaskInput::new(title, done);
            if input.valid_title().is_none() {
                return Ok(Outcome::Invalid("title is required"));
            }
            Outcome::Task(store.create(input)?)
        }
        Commands::Done { id } => found(id, store.update(id, TaskInput::done_only(true))?),
        Commands::Undone { id } => found(id, store.update(id, TaskInput::done_only(false))?),
        Commands::Rename { id, title } => {
            if title.trim().is_empty() {
                return Ok(Outcome::Invalid("title is required"));
            }
            // update always overwrites done, so carry the current flag over
            let Some(current) = store.find_by_id(id)? else {
                return Ok(Outcome::NotFound(id));
            };
            found(id, store.update(id, TaskInput::new(title, current.done))?)
        }
        Commands::Del { id } => {
            if store.delete(id)? {
                Outcome::Deleted(id)
            } else {
                Outcome::NotFound(id)
            }
        }
    };
    Ok(outcome)
}

fn found(id: i64, task: Option<Task>) -> Outcome {
    match task {
        Some(task) => Outcome::Task(task),
        None => Outcome::NotFound(id),
    }
}

fn report(outcome: Outcome, json: bool) -> ExitCode {
    match outcome {
        Outcome::Tasks(tasks) => {
            if json {
                print_json(&tasks)
            } else {
                for task in &tasks {
                    print_row(task);
                }
                ExitCode::SUCCESS
            }
        }
        Outcome::Task(task) => {
            if json {
                print_json(&task)
            } else {
                print_row(&task);
                ExitCode::SUCCESS
            }
        }
        Outcome::Deleted(id) => {
            println!("deleted {}", id);
            ExitCode::SUCCESS
        }
        Outcome::NotFound(id) => {
            eprintln!("task {} not found", id);
            ExitCode::from(3)
        }
        Outcome::Invalid(message) => {
            eprintln!("error: {}", message);
            ExitCode::from(2)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_row(task: &Task) {
    let created = task
        .created_at
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| task.created_at.to_string());
    let mark = if task.done { "x" } else { " " };
    println!("{:>5} [{}] {}  ({})", task.id, mark, task.title, created);
}
