//! Run Export
//!
//! CSV tables for the per-step counts and the final agents, and a JSON run
//! summary. Every value written is a plain number or an enum name, so no
//! field needs quoting.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use disinfo_types::{AgentRow, RunSummary, StepRow, AGENT_COLUMNS, STEP_COLUMNS};
use tracing::info;

use crate::components::Agent;
use crate::error::ExportError;

use super::history::HistoryCollector;

pub const STEP_COUNTS_FILE: &str = "state_counts.csv";
pub const AGENTS_FILE: &str = "agents.csv";
pub const SUMMARY_FILE: &str = "summary.json";

fn write_record<W: Write>(writer: &mut W, fields: &[impl AsRef<str>]) -> std::io::Result<()> {
    let line: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
    writeln!(writer, "{}", line.join(","))
}

/// Writes the per-step table, header first.
pub fn write_step_rows<W: Write>(
    writer: &mut W,
    rows: impl IntoIterator<Item = StepRow>,
) -> Result<(), ExportError> {
    write_record(writer, &STEP_COLUMNS)?;
    for row in rows {
        write_record(writer, &row.fields())?;
    }
    Ok(())
}

/// Writes the per-agent table, header first.
pub fn write_agent_rows<W: Write>(
    writer: &mut W,
    rows: impl IntoIterator<Item = AgentRow>,
) -> Result<(), ExportError> {
    write_record(writer, &AGENT_COLUMNS)?;
    for row in rows {
        write_record(writer, &row.fields())?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

pub fn write_step_csv(path: impl AsRef<Path>, history: &HistoryCollector) -> Result<(), ExportError> {
    let mut writer = create(path.as_ref())?;
    write_step_rows(&mut writer, history.rows())?;
    writer.flush()?;
    Ok(())
}

/// Writes one row per agent, sorted by id.
pub fn write_agent_csv<'a>(
    path: impl AsRef<Path>,
    agents: impl IntoIterator<Item = &'a Agent>,
) -> Result<(), ExportError> {
    let mut rows: Vec<AgentRow> = agents.into_iter().map(Agent::to_row).collect();
    rows.sort_by_key(|r| r.id);

    let mut writer = create(path.as_ref())?;
    write_agent_rows(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

pub fn write_summary_json(path: impl AsRef<Path>, summary: &RunSummary) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(summary)?;
    let path = path.as_ref();
    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Files written by [`export_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub step_counts: PathBuf,
    pub agents: PathBuf,
    pub summary: PathBuf,
}

impl ExportPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            step_counts: dir.join(STEP_COUNTS_FILE),
            agents: dir.join(AGENTS_FILE),
            summary: dir.join(SUMMARY_FILE),
        }
    }
}

/// Writes all three export files into `dir`, creating it if needed.
pub fn export_run<'a>(
    dir: impl AsRef<Path>,
    history: &HistoryCollector,
    agents: impl IntoIterator<Item = &'a Agent>,
    summary: &RunSummary,
) -> Result<ExportPaths, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = ExportPaths::in_dir(dir);
    write_step_csv(&paths.step_counts, history)?;
    write_agent_csv(&paths.agents, agents)?;
    write_summary_json(&paths.summary, summary)?;

    info!(dir = %dir.display(), steps = history.len(), "Run exported");
    Ok(paths)
}
