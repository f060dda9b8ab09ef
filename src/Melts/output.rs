//! # Experiment Output Module
//!
//! ## Aim
//! Aggregates every table an alphaMELTS run leaves in its experiment
//! directory into one queryable `MeltsOutput` object. Eight fixed table
//! kinds are loaded through a compile-time loader table; any missing or
//! malformed file yields an empty table for that slot plus a recorded
//! `LoadDiagnostic`, so construction never fails and the returned object
//! always has every field populated.
//!
//! ## Main Data Structures and Logic
//! - `TableKind`: the eight fixed table kinds and their file names
//! - `MeltsOutput`: one named `Table` field per advertised kind, a per-phase
//!   table map filled from `Phase_main_tbl.txt`, discovered phase names and
//!   major/trace element sets, a first-assigned-wins title and the load
//!   diagnostics
//! - `LoadDiagnostic` / `LoadOutcome`: explicit per-table load results a
//!   caller can inspect instead of grepping log lines
//!
//! ## Key Methods
//! - `from_directory()`: full construction in one pass over the loader table
//! - `tables()` / `table()`: the seven externally advertised table kinds
//!   (per-phase data is reached through `phases` instead)
//! - `pretty_print()`: compact console report of what was found

use crate::Geochem::ind::{is_common_element, is_common_oxide};
use crate::Melts::parse::from_melts_cstr;
use crate::Melts::table::{DEFAULT_SKIPROWS, Table, TableError, read_table_title};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Columns of the phase mass/volume tables that describe the run step
/// rather than a phase.
const STRUCTURAL_COLUMNS: &[&str] = &["Pressure", "Temperature", "mass", "V"];

/// The eight fixed table kinds an alphaMELTS run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableKind {
    BulkComp,
    SolidComp,
    LiquidComp,
    PhaseMass,
    PhaseVol,
    TraceComp,
    System,
    PhaseMain,
}

impl TableKind {
    pub const ALL: [TableKind; 8] = [
        TableKind::BulkComp,
        TableKind::SolidComp,
        TableKind::LiquidComp,
        TableKind::PhaseMass,
        TableKind::PhaseVol,
        TableKind::TraceComp,
        TableKind::System,
        TableKind::PhaseMain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::BulkComp => "bulkcomp",
            TableKind::SolidComp => "solidcomp",
            TableKind::LiquidComp => "liquidcomp",
            TableKind::PhaseMass => "phasemass",
            TableKind::PhaseVol => "phasevol",
            TableKind::TraceComp => "tracecomp",
            TableKind::System => "system",
            TableKind::PhaseMain => "phasemain",
        }
    }

    /// Fixed file name of this table kind inside an experiment directory.
    pub fn filename(&self) -> &'static str {
        match self {
            TableKind::BulkComp => "Bulk_comp_tbl.txt",
            TableKind::SolidComp => "Solid_comp_tbl.txt",
            TableKind::LiquidComp => "Liquid_comp_tbl.txt",
            TableKind::PhaseMass => "Phase_mass_tbl.txt",
            TableKind::PhaseVol => "Phase_vol_tbl.txt",
            TableKind::TraceComp => "Trace_main_tbl.txt",
            TableKind::System => "System_main_tbl.txt",
            TableKind::PhaseMain => "Phase_main_tbl.txt",
        }
    }
}

/// Result of one table load attempt.
#[derive(Debug, Clone, Serialize)]
pub enum LoadOutcome {
    Loaded { rows: usize },
    MissingFile,
    Failed(String),
}

/// Per-table load record kept on the output object so callers can inspect
/// failures instead of parsing log lines.
#[derive(Debug, Clone, Serialize)]
pub struct LoadDiagnostic {
    pub kind: TableKind,
    pub path: PathBuf,
    pub outcome: LoadOutcome,
}

type Loader = fn(&mut MeltsOutput, &Path) -> Result<Table, TableError>;

/// Kind -> parser function, resolved at compile time.
const LOADERS: [(TableKind, Loader); 8] = [
    (TableKind::BulkComp, MeltsOutput::read_bulkcomp as Loader),
    (TableKind::SolidComp, MeltsOutput::read_solidcomp as Loader),
    (
        TableKind::LiquidComp,
        MeltsOutput::read_liquidcomp as Loader,
    ),
    (TableKind::PhaseMass, MeltsOutput::read_phasemass as Loader),
    (TableKind::PhaseVol, MeltsOutput::read_phasevol as Loader),
    (TableKind::TraceComp, MeltsOutput::read_trace as Loader),
    (TableKind::System, MeltsOutput::read_systemmain as Loader),
    (TableKind::PhaseMain, MeltsOutput::read_phasemain as Loader),
];

/// All table outputs of a single alphaMELTS experiment directory.
#[derive(Debug, Clone)]
pub struct MeltsOutput {
    /// Resolved experiment title; the first file to report one wins.
    pub title: Option<String>,
    /// When false, every Temperature column is converted to Celsius at read
    /// time.
    pub kelvin: bool,
    /// Phase names discovered in the phase mass/volume tables.
    pub phasenames: BTreeSet<String>,
    /// Major-oxide column names seen in the composition tables.
    pub majors: BTreeSet<String>,
    /// Trace-element column names seen in the trace table.
    pub traces: BTreeSet<String>,
    /// Per-phase tables from `Phase_main_tbl.txt`.
    pub phases: BTreeMap<String, Table>,
    pub bulkcomp: Table,
    pub solidcomp: Table,
    pub liquidcomp: Table,
    pub phasemass: Table,
    pub phasevol: Table,
    pub tracecomp: Table,
    pub system: Table,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl MeltsOutput {
    fn empty(kelvin: bool) -> Self {
        MeltsOutput {
            title: None,
            kelvin,
            phasenames: BTreeSet::new(),
            majors: BTreeSet::new(),
            traces: BTreeSet::new(),
            phases: BTreeMap::new(),
            bulkcomp: Table::new(),
            solidcomp: Table::new(),
            liquidcomp: Table::new(),
            phasemass: Table::new(),
            phasevol: Table::new(),
            tracecomp: Table::new(),
            system: Table::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Load every table kind from an experiment directory. Never fails:
    /// missing or malformed files leave an empty table in the corresponding
    /// slot and a diagnostic record.
    pub fn from_directory(directory: impl AsRef<Path>, kelvin: bool) -> Self {
        let directory = directory.as_ref();
        let mut output = MeltsOutput::empty(kelvin);
        for (kind, load) in LOADERS {
            let path = directory.join(kind.filename());
            match load(&mut output, &path) {
                Ok(table) => {
                    let rows = if kind == TableKind::PhaseMain {
                        output.phases.len()
                    } else {
                        table.nrows()
                    };
                    output.diagnostics.push(LoadDiagnostic {
                        kind,
                        path,
                        outcome: LoadOutcome::Loaded { rows },
                    });
                    output.assign(kind, table);
                }
                Err(TableError::MissingFile(_)) => {
                    debug!("Expected file {} does not exist.", path.display());
                    output.diagnostics.push(LoadDiagnostic {
                        kind,
                        path,
                        outcome: LoadOutcome::MissingFile,
                    });
                    output.assign(kind, Table::new());
                }
                Err(e) => {
                    debug!(
                        "Error on table import: {:?} {}",
                        output.title,
                        path.display()
                    );
                    output.diagnostics.push(LoadDiagnostic {
                        kind,
                        path,
                        outcome: LoadOutcome::Failed(e.to_string()),
                    });
                    output.assign(kind, Table::new());
                }
            }
        }
        output
    }

    fn assign(&mut self, kind: TableKind, table: Table) {
        match kind {
            TableKind::BulkComp => self.bulkcomp = table,
            TableKind::SolidComp => self.solidcomp = table,
            TableKind::LiquidComp => self.liquidcomp = table,
            TableKind::PhaseMass => self.phasemass = table,
            TableKind::PhaseVol => self.phasevol = table,
            TableKind::TraceComp => self.tracecomp = table,
            TableKind::System => self.system = table,
            // per-phase data lives in self.phases
            TableKind::PhaseMain => {}
        }
    }

    /// The externally advertised table kinds. `phasemain` is deliberately
    /// excluded; per-phase tables are reached through `phases`.
    pub fn tables(&self) -> BTreeSet<&'static str> {
        TableKind::ALL
            .iter()
            .filter(|k| **k != TableKind::PhaseMain)
            .map(|k| k.as_str())
            .collect()
    }

    pub fn table(&self, kind: TableKind) -> Option<&Table> {
        match kind {
            TableKind::BulkComp => Some(&self.bulkcomp),
            TableKind::SolidComp => Some(&self.solidcomp),
            TableKind::LiquidComp => Some(&self.liquidcomp),
            TableKind::PhaseMass => Some(&self.phasemass),
            TableKind::PhaseVol => Some(&self.phasevol),
            TableKind::TraceComp => Some(&self.tracecomp),
            TableKind::System => Some(&self.system),
            TableKind::PhaseMain => None,
        }
    }

    /// First non-empty title wins; an equal repeat is silent, a conflicting
    /// one is logged and ignored.
    pub(crate) fn set_title(&mut self, title: String) {
        match &self.title {
            None => self.title = Some(title),
            Some(current) if *current == title => {}
            Some(current) => {
                debug!(
                    "File with conflicting title found: {}; expected {}",
                    title, current
                );
            }
        }
    }

    /// Common single-block read path: title consistency check, parse, drop
    /// all-missing columns, Celsius conversion, Mg# derivation.
    fn read_table(&mut self, path: &Path, skiprows: usize) -> Result<Table, TableError> {
        if !path.is_file() {
            return Err(TableError::MissingFile(path.to_path_buf()));
        }
        let title = read_table_title(path)?;
        self.set_title(title);
        let mut table = Table::from_file(path, skiprows)?;
        table.drop_empty_columns();
        if !self.kelvin {
            table.convert_temperature_to_celsius();
        }
        table.add_mg_number();
        Ok(table)
    }

    fn collect_majors(&mut self, table: &Table) {
        for c in &table.columns {
            if is_common_oxide(c) {
                self.majors.insert(c.clone());
            }
        }
    }

    fn collect_traces(&mut self, table: &Table) {
        for c in &table.columns {
            if is_common_element(c) {
                self.traces.insert(c.clone());
            }
        }
    }

    fn collect_phasenames(&mut self, table: &Table) {
        for c in &table.columns {
            if !STRUCTURAL_COLUMNS.contains(&c.as_str()) {
                self.phasenames.insert(c.clone());
            }
        }
    }

    fn read_bulkcomp(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        self.collect_majors(&table);
        Ok(table)
    }

    fn read_solidcomp(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        self.collect_majors(&table);
        Ok(table)
    }

    fn read_liquidcomp(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        self.collect_majors(&table);
        Ok(table)
    }

    fn read_phasemass(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        self.collect_phasenames(&table);
        Ok(table)
    }

    fn read_phasevol(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        self.collect_phasenames(&table);
        Ok(table)
    }

    fn read_trace(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        self.collect_traces(&table);
        Ok(table)
    }

    fn read_systemmain(&mut self, path: &Path) -> Result<Table, TableError> {
        let mut table = self.read_table(path, DEFAULT_SKIPROWS)?;
        table.zero_to_nan();
        Ok(table)
    }

    /// Parse the multi-block `Phase_main_tbl.txt`: blank-line-separated
    /// blocks after a discarded header block, each headed by a phase-name
    /// token, then a column header and data rows. Only safe to call on a
    /// fully written file; a truncated block yields `Malformed`, which the
    /// constructor converts into an empty slot (phases parsed before the
    /// error remain).
    fn read_phasemain(&mut self, path: &Path) -> Result<Table, TableError> {
        if !path.is_file() {
            return Err(TableError::MissingFile(path.to_path_buf()));
        }
        let title = read_table_title(path)?;
        self.set_title(title);
        let content = std::fs::read_to_string(path)?.replace("\r\n", "\n");
        for block in content.split("\n\n").skip(1) {
            let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                continue;
            }
            let phase = lines[0]
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string();
            if lines.len() < 2 {
                return Err(TableError::Malformed(format!(
                    "truncated block for phase {} in {}",
                    phase,
                    path.display()
                )));
            }
            let mut table = Table::parse(&lines[1..])?;
            table.zero_to_nan();
            if let Some(cells) = table.formula.as_mut() {
                for cell in cells.iter_mut() {
                    *cell = from_melts_cstr(cell);
                }
            }
            if !self.kelvin {
                table.convert_temperature_to_celsius();
            }
            self.phases.insert(phase, table);
        }
        Ok(Table::new())
    }

    pub fn pretty_print(&self) {
        use prettytable::{Cell, Row, Table, row};
        let mut ptable = Table::new();
        ptable.add_row(row!["table", "rows", "columns"]);
        for kind in TableKind::ALL {
            if let Some(t) = self.table(kind) {
                ptable.add_row(Row::new(vec![
                    Cell::new(kind.as_str()),
                    Cell::new(&t.nrows().to_string()),
                    Cell::new(&t.ncols().to_string()),
                ]));
            }
        }
        println!(
            "Experiment: {}",
            self.title.as_deref().unwrap_or("<no title>")
        );
        ptable.printstd();
        println!(
            "Phases: {}",
            self.phases.keys().cloned().collect::<Vec<_>>().join(", ")
        );
    }
}
