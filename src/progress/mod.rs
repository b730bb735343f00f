// Daily progress: which plan day is active, task gating, streak and coin rewards

mod day_index;
mod engine;
mod reconcile;

pub use day_index::day_index;
pub use engine::{DashboardView, ProgressEngine, TaskView, ToggleOutcome};
pub use reconcile::{reconcile, WorkingState};
