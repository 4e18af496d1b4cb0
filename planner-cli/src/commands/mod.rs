pub mod calendar;
pub mod dashboard;
pub mod day;
pub mod delete;
pub mod events;
pub mod menu;
pub mod new;
pub mod shell;
pub mod transfer;

use chrono::NaiveDate;
use planner_core::app::Planner;
use planner_core::bridge::FileBridge;
use planner_core::store::FileSlot;

/// Everything a command needs: the planner root, the bridge file and the
/// date the session treats as today.
pub struct Context {
    pub planner: Planner<FileSlot>,
    pub bridge: FileBridge,
    pub today: NaiveDate,
}
