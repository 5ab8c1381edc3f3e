//! Integration tests for a full session.
//!
//! Covers first-run defaults, startup from files in a directory, ticking
//! through whole cycles and saving on quit.

use pompompom_core::{
    Command, Event, FilePaths, Phase, Reply, Session, Settings, DEFAULT_SETTINGS_FILE,
    DEFAULT_TASKS_FILE,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn first_run_with_no_files_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let session = Session::open(FilePaths::in_dir(dir.path()));

    assert_eq!(session.settings(), &Settings::default());
    assert!(session.tasks().is_empty());
    assert_eq!(session.phase(), Phase::Work);
    assert_eq!(session.timer().remaining_secs(), 25 * 60);
    assert!(!session.timer().is_running());
}

#[test]
fn startup_loads_both_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, DEFAULT_TASKS_FILE, "Task Name,Pomodoros\nTaxes,2\nAccounts,2\n");
    write(&dir, DEFAULT_SETTINGS_FILE, r#"{"work": "50", "short": "10"}"#);

    let session = Session::open(FilePaths::in_dir(dir.path()));

    let tasks = session.tasks().tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!((tasks[0].name.as_str(), tasks[0].required, tasks[0].completed), ("Taxes", 2, 0));
    assert_eq!((tasks[1].name.as_str(), tasks[1].required, tasks[1].completed), ("Accounts", 2, 0));
    assert_eq!(session.tasks().active_index(), Some(0));

    assert_eq!(session.settings().work_minutes, 50);
    assert_eq!(session.settings().short_break_minutes, 10);
    assert_eq!(session.settings().long_break_minutes, 15);
    assert_eq!(session.timer().remaining_secs(), 50 * 60);
}

#[test]
fn broken_files_do_not_stop_startup() {
    let dir = TempDir::new().unwrap();
    write(&dir, DEFAULT_TASKS_FILE, "Task Name,Pomodoros\nTaxes,lots\nAccounts,2\n");
    write(&dir, DEFAULT_SETTINGS_FILE, "not json at all");

    let session = Session::open(FilePaths::in_dir(dir.path()));

    assert_eq!(session.settings(), &Settings::default());
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks().tasks()[0].name, "Accounts");
}

#[test]
fn ticking_through_a_day() {
    let dir = TempDir::new().unwrap();
    write(&dir, DEFAULT_TASKS_FILE, "Task Name,Pomodoros\nTaxes,2\nAccounts,2\n");
    write(
        &dir,
        DEFAULT_SETTINGS_FILE,
        r#"{"work": 1, "short": 1, "long": 2, "cycles": 2}"#,
    );
    let mut session = Session::open(FilePaths::in_dir(dir.path()));
    session.start();

    let mut breaks = Vec::new();
    let mut credited = 0;
    // Two long-break rounds: 4 work minutes, 2 short, 2 long.
    for _ in 0..(4 + 2 + 2 * 2) * 60 {
        for event in session.tick() {
            match event {
                Event::PhaseChanged { to, .. } if to.is_break() => breaks.push(to),
                Event::TaskCredited { .. } => credited += 1,
                _ => {}
            }
        }
    }

    assert_eq!(
        breaks,
        [Phase::ShortBreak, Phase::LongBreak, Phase::ShortBreak, Phase::LongBreak]
    );
    assert_eq!(credited, 4);
    assert!(session.tasks().all_done());
}

#[test]
fn pause_holds_the_clock() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(FilePaths::in_dir(dir.path()));
    session.start();
    session.tick();
    let before = (session.phase(), session.timer().remaining_secs());

    session.dispatch(Command::TogglePause).unwrap();
    for _ in 0..100 {
        session.tick();
    }
    session.dispatch(Command::TogglePause).unwrap();

    assert_eq!((session.phase(), session.timer().remaining_secs()), before);
}

#[test]
fn deselected_session_never_credits() {
    let dir = TempDir::new().unwrap();
    write(&dir, DEFAULT_TASKS_FILE, "Task Name,Pomodoros\nTaxes,2\nAccounts,2\n");
    let mut session = Session::open(FilePaths::in_dir(dir.path()));
    session.dispatch(Command::Deselect).unwrap();

    for _ in 0..10 {
        session.dispatch(Command::Next).unwrap();
    }

    assert!(session.tasks().tasks().iter().all(|t| t.completed == 0));
}

#[test]
fn quit_writes_files_back() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(FilePaths::in_dir(dir.path()));
    session
        .dispatch(Command::AddTask { name: "Taxes".into(), required: 2 })
        .unwrap();
    session
        .dispatch(Command::Set { key: "cycles".into(), value: "3".into() })
        .unwrap();

    let reply = session.dispatch(Command::Quit).unwrap();
    assert!(matches!(reply, Reply::Quit));

    let tasks = std::fs::read_to_string(dir.path().join(DEFAULT_TASKS_FILE)).unwrap();
    assert_eq!(tasks, "Task Name,Pomodoros\nTaxes,2\n");
    let settings = Settings::load(&dir.path().join(DEFAULT_SETTINGS_FILE)).unwrap();
    assert_eq!(settings.cycles_before_long_break, 3);
}
