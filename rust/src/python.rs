//! Python bindings for the CPM engine.
//!
//! Mirrors the Rust API with wrapper classes; validation failures surface as
//! `ValueError`.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::ScheduleConfig;
use crate::cpm::{compute_schedule_with_config, TaskTiming};
use crate::models::{Task, TaskSet};

/// A task as seen from Python.
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: i64,
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
    #[pyo3(get, set)]
    pub label: String,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (name, duration, predecessors=Vec::new(), label=String::new()))]
    fn new(name: String, duration: i64, predecessors: Vec<String>, label: String) -> Self {
        Self {
            name,
            duration,
            predecessors,
            label,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(name={:?}, duration={}, predecessors={:?})",
            self.name, self.duration, self.predecessors
        )
    }
}

/// Dates and slack for one task.
#[pyclass(name = "TaskTiming")]
#[derive(Clone, Debug)]
pub struct PyTaskTiming {
    #[pyo3(get)]
    pub earliest_start: i64,
    #[pyo3(get)]
    pub earliest_finish: i64,
    #[pyo3(get)]
    pub latest_start: i64,
    #[pyo3(get)]
    pub latest_finish: i64,
    #[pyo3(get)]
    pub slack: i64,
}

impl From<&TaskTiming> for PyTaskTiming {
    fn from(t: &TaskTiming) -> Self {
        Self {
            earliest_start: t.earliest_start,
            earliest_finish: t.earliest_finish,
            latest_start: t.latest_start,
            latest_finish: t.latest_finish,
            slack: t.slack,
        }
    }
}

#[pymethods]
impl PyTaskTiming {
    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, slack={})",
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

/// Schedule snapshot returned to Python.
#[pyclass(name = "ScheduleResult")]
#[derive(Clone, Debug)]
pub struct PyScheduleResult {
    #[pyo3(get)]
    pub total_duration: i64,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub order: Vec<String>,
    #[pyo3(get)]
    pub timings: HashMap<String, PyTaskTiming>,
}

#[pymethods]
impl PyScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(total_duration={}, critical_path={:?})",
            self.total_duration, self.critical_path
        )
    }
}

/// Compute the CPM schedule for a list of tasks.
///
/// # Arguments
/// * `tasks` - Tasks in insertion order (used as the sibling tie-break)
/// * `verbosity` - Logging verbosity 0-3
///
/// # Raises
/// * ValueError on duplicate/reserved names, unknown predecessors, negative
///   durations or circular dependencies
#[pyfunction]
#[pyo3(signature = (tasks, verbosity=0))]
fn compute_schedule(tasks: Vec<PyTask>, verbosity: u8) -> PyResult<PyScheduleResult> {
    let set = TaskSet::from_tasks(tasks.into_iter().map(|t| Task {
        name: t.name,
        duration: t.duration,
        predecessors: t.predecessors,
        label: t.label,
    }))
    .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    let config = ScheduleConfig::default().with_verbosity(verbosity);
    let result = compute_schedule_with_config(&set, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    Ok(PyScheduleResult {
        total_duration: result.total_duration(),
        critical_path: result.critical_path().to_vec(),
        order: result.order().to_vec(),
        timings: result
            .timings()
            .map(|(name, t)| (name.to_string(), PyTaskTiming::from(t)))
            .collect(),
    })
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PyTaskTiming>()?;
    m.add_class::<PyScheduleResult>()?;
    m.add_function(wrap_pyfunction!(compute_schedule, m)?)?;
    Ok(())
}
