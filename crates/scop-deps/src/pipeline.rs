use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::candl::StatementTable;
use crate::cycle::{CycleMatrix, VariableReport};
use crate::error::{DepsError, Result};
use crate::graph::VariableGraphs;

/// Default location of the Clan executable.
pub const DEFAULT_CLAN: &str = "../clan/clan";
/// Default location of the Candl executable.
pub const DEFAULT_CANDL: &str = "../candl/candl";

/// Paths of the external polyhedral tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub clan: PathBuf,
    pub candl: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            clan: PathBuf::from(DEFAULT_CLAN),
            candl: PathBuf::from(DEFAULT_CANDL),
        }
    }
}

impl Toolchain {
    pub fn new(clan: impl Into<PathBuf>, candl: impl Into<PathBuf>) -> Self {
        Toolchain {
            clan: clan.into(),
            candl: candl.into(),
        }
    }

    /// Extract the SCoP of `source` with Clan, analyse it with Candl, and
    /// report the dependence cycles of every variable.
    ///
    /// Writes `<source>.scop` and `<source>.candl` next to the source file.
    pub fn check_source(&self, source: &Path) -> Result<Vec<VariableReport>> {
        if !source.exists() {
            return Err(DepsError::SourceNotFound(source.to_path_buf()));
        }

        let scop = artifact_path(source, "scop");
        let candl = artifact_path(source, "candl");

        run_tool(
            "Clan",
            Command::new(&self.clan).arg(source).arg("-o").arg(&scop),
        )?;
        run_tool(
            "Candl",
            Command::new(&self.candl).arg(&scop).arg("-o").arg(&candl),
        )?;

        analyze_file(&candl)
    }
}

/// `<source>.<ext>`, keeping the source's own extension.
pub fn artifact_path(source: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn run_tool(tool: &str, cmd: &mut Command) -> Result<()> {
    info!("running {}: {:?}", tool, cmd);
    let output = cmd.output().map_err(|e| match e.kind() {
        ErrorKind::NotFound => DepsError::ToolNotFound {
            tool: cmd.get_program().to_string_lossy().into_owned(),
        },
        _ => DepsError::Io(e),
    })?;

    if !output.status.success() {
        return Err(DepsError::ToolFailed {
            tool: tool.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    info!("{} finished", tool);
    Ok(())
}

/// Cycle reports for a Candl output file.
pub fn analyze_file(path: &Path) -> Result<Vec<VariableReport>> {
    debug!("reading candl output {}", path.display());
    let text = std::fs::read_to_string(path)?;
    analyze_str(&text)
}

/// Cycle reports for Candl output text, one per variable in first-seen order.
pub fn analyze_str(text: &str) -> Result<Vec<VariableReport>> {
    let table = StatementTable::parse(text)?;
    let graphs = VariableGraphs::parse(text);
    debug!(
        "{} statements, {} variables with dependences",
        table.len(),
        graphs.len()
    );

    Ok(graphs
        .iter()
        .map(|(variable, graph)| VariableReport {
            variable: variable.to_string(),
            matrix: CycleMatrix::build(graph, &table),
        })
        .collect())
}
