//! Output
//!
//! Per-step history and run export.

pub mod export;
pub mod history;

pub use export::{
    export_run, write_agent_csv, write_agent_rows, write_step_csv, write_step_rows,
    write_summary_json, ExportPaths,
};
pub use history::HistoryCollector;
