use pompompom_core::{Event, Session, TaskRegistry};

pub fn clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One-line timer display: clock, phase, caption.
pub fn status_line(session: &Session) -> String {
    let timer = session.timer();
    let paused = if timer.is_running() { "" } else { "  [paused]" };
    format!(
        "{}  {:<11}  {}{}",
        clock(timer.remaining_secs()),
        timer.phase().label(),
        session.caption(),
        paused
    )
}

/// A message for the events worth telling the user about.
pub fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::PhaseChanged { to, skipped: true, .. } => format!("skipped to {to}"),
        Event::PhaseChanged { to, .. } => format!("time for: {to}"),
        Event::TimerPaused { .. } => "paused".to_string(),
        Event::TimerResumed { .. } | Event::TimerStarted { .. } => "running".to_string(),
        Event::TimerReset { .. } => "cycle restarted".to_string(),
        Event::TaskCredited {
            name,
            completed,
            required,
            ..
        } => format!("+1 pomodoro for {name} ({completed}/{required})"),
        Event::TaskAdvanced { name, .. } => format!("next task: {name}"),
        Event::AllTasksCompleted { .. } => "all tasks completed".to_string(),
        Event::StateSnapshot { .. } => return None,
    };
    Some(text)
}

/// Numbered task list, active task marked with `*`.
pub fn task_table(tasks: &TaskRegistry) -> String {
    if tasks.is_empty() {
        return "no tasks".to_string();
    }
    tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let marker = if tasks.active_index() == Some(i) { '*' } else { ' ' };
            format!(
                "{marker} {:>2}. {} ({}/{} pomodoros)",
                i + 1,
                task.name,
                task.completed,
                task.required
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
