//! Task list editing from the command line.

use clap::Subcommand;
use pompompom_core::{FilePaths, Session};

use crate::render;
use crate::repl::task_index;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Pomodoros the task needs
        #[arg(long, default_value = "1")]
        pomodoros: u32,
    },
    /// Change a task
    Edit {
        /// Task number as shown by `task list`
        number: usize,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New pomodoro count
        #[arg(long)]
        pomodoros: Option<u32>,
    },
    /// Delete a task
    Remove {
        /// Task number as shown by `task list`
        number: usize,
    },
}

pub fn run(paths: FilePaths, action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(paths);

    match action {
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.tasks().tasks())?);
            } else {
                println!("{}", render::task_table(session.tasks()));
            }
            return Ok(());
        }
        TaskAction::Add { name, pomodoros } => {
            let index = session.add_task(&name, pomodoros)?;
            println!("Task added: {}", index + 1);
        }
        TaskAction::Edit {
            number,
            name,
            pomodoros,
        } => {
            let index = task_index(number)?;
            let task = session
                .tasks()
                .get(index)
                .cloned()
                .ok_or_else(|| format!("no task {number}"))?;
            session.edit_task(
                index,
                name.as_deref().unwrap_or(&task.name),
                pomodoros.unwrap_or(task.required),
            )?;
            println!("Task updated: {number}");
        }
        TaskAction::Remove { number } => {
            let index = task_index(number)?;
            session.remove_task(index)?;
            println!("Task removed: {number}");
        }
    }

    session.save_tasks()?;
    Ok(())
}
