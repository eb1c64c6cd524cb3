//! Task bookkeeping and timeline interaction for the day planner.
//!
//! The store, geometry helpers and gesture machine are UI-agnostic; the wasm frontend
//! renders from them and feeds pointer events back in.

pub mod calendar;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod storage;
pub mod store;
pub mod task;

pub use config::PlannerConfig;
pub use geometry::{FIRST_HOUR, HOUR_HEIGHT, LAST_HOUR, TimelineLayout, clamp_hour, format_hour};
pub use gesture::{Commit, Ghost, GestureKind, TimelineGesture};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{DaySummary, TaskStore};
pub use task::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
