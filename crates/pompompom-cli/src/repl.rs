//! Parsing of the interactive command lines typed during `run`.

use pompompom_core::Command;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Goes to the session.
    Command(Command),
    /// Handled by the front end alone.
    Status,
    Tasks,
    Help,
    Blank,
}

pub const HELP: &str = "\
commands:
  next | n                      skip to the next phase
  pause | p                     pause or resume
  select <n>                    credit pomodoros to task n
  deselect                      stop crediting tasks
  add <pomodoros> <name>        add a task
  edit <n> <pomodoros> <name>   change a task
  remove <n>                    delete a task
  set <key> <value>             change a setting (work, short, long, cycles, ...)
  reset                         restart the cycle
  tasks | ls                    list tasks
  status | s                    show the timer
  save                          write task and settings files
  quit | q                      save and exit";

/// Turn a 1-based task number from the user into an index.
pub fn task_index(number: usize) -> Result<usize, String> {
    number
        .checked_sub(1)
        .ok_or_else(|| "task numbers start at 1".to_string())
}

pub fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(Input::Blank),
        "status" | "s" => return Ok(Input::Status),
        "tasks" | "ls" => return Ok(Input::Tasks),
        "help" | "?" => return Ok(Input::Help),
        "next" | "n" => Command::Next,
        "pause" | "p" | "resume" => Command::TogglePause,
        "reset" => Command::Reset,
        "save" => Command::Save,
        "quit" | "q" | "exit" => Command::Quit,
        "deselect" => Command::Deselect,
        "select" => Command::Select {
            index: task_index(number(rest)?)?,
        },
        "remove" | "rm" => Command::RemoveTask {
            index: task_index(number(rest)?)?,
        },
        "add" => {
            let (required, name) = split_first(rest, "add <pomodoros> <name>")?;
            Command::AddTask {
                name: name.to_string(),
                required: count(required)?,
            }
        }
        "edit" => {
            let usage = "edit <n> <pomodoros> <name>";
            let (n, rest) = split_first(rest, usage)?;
            let (required, name) = split_first(rest, usage)?;
            Command::EditTask {
                index: task_index(number(n)?)?,
                name: name.to_string(),
                required: count(required)?,
            }
        }
        "set" => {
            let (key, value) = split_first(rest, "set <key> <value>")?;
            Command::Set {
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Input::Command(command))
}

fn split_first<'a>(text: &'a str, usage: &str) -> Result<(&'a str, &'a str), String> {
    text.split_once(char::is_whitespace)
        .map(|(first, rest)| (first, rest.trim()))
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or_else(|| format!("usage: {usage}"))
}

fn number(text: &str) -> Result<usize, String> {
    text.parse()
        .map_err(|_| format!("expected a task number, got '{text}'"))
}

fn count(text: &str) -> Result<u32, String> {
    text.parse()
        .map_err(|_| format!("expected a pomodoro count, got '{text}'"))
}
