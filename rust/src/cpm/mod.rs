//! Critical Path Method scheduling.
//!
//! Validates a task set, orders it topologically, runs the forward and
//! backward passes and extracts the zero-slack tasks. Every computation is a
//! pure function of its input.

mod calculation;
mod calendar;
mod graph;
mod types;

pub use calculation::{compute_schedule, compute_schedule_with_config};
pub use calendar::{ProjectedDates, TaskDates};
pub(crate) use graph::ScheduleGraph;
pub use graph::{topological_order, ScheduleError};
pub use types::{ScheduleResult, TaskStatus, TaskTiming};

#[cfg(test)]
mod properties;
