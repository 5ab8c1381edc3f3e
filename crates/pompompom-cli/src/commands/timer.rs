use std::io::Write;
use std::time::Duration;

use clap::Args;
use pompompom_core::{FilePaths, Reply, Session};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;
use crate::repl::{self, Input};
use crate::ticker::Ticker;

#[derive(Args)]
pub struct RunArgs {
    /// Milliseconds per timer second
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Start paused instead of running
    #[arg(long)]
    paused: bool,
    /// Print the status line after every tick
    #[arg(long)]
    live: bool,
}

pub fn run(paths: FilePaths, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session_loop(paths, args));
    // The stdin reader may still be blocked on a read.
    runtime.shutdown_background();
    result
}

async fn session_loop(paths: FilePaths, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(paths);
    if !args.paused {
        session.start();
    }
    println!("{}", render::status_line(&session));

    let mut ticker = Ticker::new(Duration::from_millis(args.tick_ms));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for event in session.tick() {
                    announce(&event);
                }
                if args.live {
                    print!("\r{}\x1b[K", render::status_line(&session));
                    std::io::stdout().flush()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    quit(&mut session)?;
                    break;
                };
                if handle_line(&mut session, &line)? {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                println!();
                quit(&mut session)?;
                break;
            }
        }
    }
    Ok(())
}

/// Returns true when the session is over.
fn handle_line(session: &mut Session, line: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let input = match repl::parse(line) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{message}");
            return Ok(false);
        }
    };
    match input {
        Input::Blank => {}
        Input::Help => println!("{}", repl::HELP),
        Input::Status => println!("{}", render::status_line(session)),
        Input::Tasks => println!("{}", render::task_table(session.tasks())),
        Input::Command(command) => {
            tracing::debug!(?command, "dispatch");
            match session.dispatch(command) {
                Ok(Reply::Events(events)) => {
                    events.iter().for_each(announce);
                    println!("{}", render::status_line(session));
                }
                Ok(Reply::Updated) => {
                    println!("{}", render::task_table(session.tasks()));
                    println!("{}", render::status_line(session));
                }
                Ok(Reply::Saved) => println!("saved"),
                Ok(Reply::Quit) => {
                    println!("bye");
                    return Ok(true);
                }
                Err(e) => eprintln!("error: {e}"),
            }
        }
    }
    Ok(false)
}

fn quit(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    session.dispatch(pompompom_core::Command::Quit)?;
    println!("bye");
    Ok(())
}

fn announce(event: &pompompom_core::Event) {
    if let Some(text) = render::describe(event) {
        println!("{text}");
    }
}
