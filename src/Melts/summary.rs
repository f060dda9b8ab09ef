//! # Experiment Summary Module
//!
//! ## Aim
//! Aggregates alphaMELTS experiment results across sibling directories into
//! a title-indexed mapping and serializes a simple phase-list report.
//!
//! ## Main Data Structures and Logic
//! - `ExperimentSummary`: title -> `SummaryEntry { phases, output }` built
//!   once from a batch of directories, never mutated afterward. Two
//!   experiments producing the same title collide and the later one
//!   overwrites the earlier entry; this mirrors the established behavior of
//!   the file format's reference tooling.
//! - `reduced_phase_name`: merges polymorphic/compositional variants of one
//!   phase (`Augite_1` -> `Augite`) under a single label.
//! - `write_summary_phaselist`: one padded line per experiment with its
//!   comma-joined reduced phase list.

use crate::Melts::output::MeltsOutput;
use log::warn;
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const DEFAULT_PHASELIST_FILENAME: &str = "phaselist.txt";

/// One experiment in a summary: the reduced phase-name set and the full
/// output object it came from.
#[derive(Debug)]
pub struct SummaryEntry {
    pub phases: BTreeSet<String>,
    pub output: MeltsOutput,
}

/// Experiment outputs indexed by resolved title.
#[derive(Debug, Default)]
pub struct ExperimentSummary {
    pub experiments: BTreeMap<String, SummaryEntry>,
}

impl ExperimentSummary {
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&SummaryEntry> {
        self.experiments.get(title)
    }

    pub fn pretty_print(&self) {
        use prettytable::{Cell, Row, Table, row};
        let mut ptable = Table::new();
        ptable.add_row(row!["experiment", "phases"]);
        for (title, entry) in &self.experiments {
            let phases = entry
                .phases
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            ptable.add_row(Row::new(vec![Cell::new(title), Cell::new(&phases)]));
        }
        ptable.printstd();
    }

    /// Compact JSON report: per title, the reduced phase list and the load
    /// diagnostics of each experiment.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (title, entry) in &self.experiments {
            map.insert(
                title.clone(),
                json!({
                    "phases": entry.phases.iter().collect::<Vec<_>>(),
                    "diagnostics": serde_json::to_value(&entry.output.diagnostics)
                        .unwrap_or(Value::Null),
                }),
            );
        }
        Value::Object(map)
    }
}

/// Strip the compositional-variant suffix from a phase name: everything
/// from the first underscore onward. A leading underscore is left alone.
pub fn reduced_phase_name(name: &str) -> &str {
    match name.find('_') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Aggregate one experiment per given directory, keyed by resolved title.
pub fn get_experiments_summary_from_dirs<P: AsRef<Path>>(
    dirs: &[P],
    kelvin: bool,
) -> ExperimentSummary {
    let mut summary = ExperimentSummary::default();
    for dir in dirs {
        let output = MeltsOutput::from_directory(dir.as_ref(), kelvin);
        let title = match &output.title {
            Some(t) => t.clone(),
            None => {
                warn!(
                    "Experiment in {} has no resolvable title",
                    dir.as_ref().display()
                );
                String::new()
            }
        };
        let phases: BTreeSet<String> = output
            .phasenames
            .iter()
            .map(|p| reduced_phase_name(p).to_string())
            .collect();
        summary
            .experiments
            .insert(title, SummaryEntry { phases, output });
    }
    summary
}

/// Aggregate the immediate subdirectories of a parent directory, each
/// treated as one experiment.
pub fn get_experiments_summary(
    dir: impl AsRef<Path>,
    kelvin: bool,
) -> std::io::Result<ExperimentSummary> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(get_experiments_summary_from_dirs(&dirs, kelvin))
}

/// Write the phase-list report: one line per experiment, the title padded
/// to the widest title plus two spaces, then the comma-joined reduced phase
/// names. Computes the summary (Celsius mode) when one is not supplied.
pub fn write_summary_phaselist(
    dir: &Path,
    summary: Option<&ExperimentSummary>,
    filename: &str,
) -> std::io::Result<()> {
    let computed;
    let summary = match summary {
        Some(s) => s,
        None => {
            computed = get_experiments_summary(dir, false)?;
            &computed
        }
    };
    let max_name_len = summary
        .experiments
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);
    let lines: Vec<String> = summary
        .experiments
        .iter()
        .map(|(name, entry)| {
            let phases = entry
                .phases
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "{}{}{}",
                name,
                " ".repeat(max_name_len - name.len() + 2),
                phases
            )
        })
        .collect();
    std::fs::write(dir.join(filename), lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_experiment(dir: &Path, title: &str, phase_columns: &str) {
        fs::create_dir_all(dir).unwrap();
        let content = format!(
            "Title: {}\n\nPhase masses:\nPressure Temperature mass {}\n1000.0 1473.15 100.0 98.5 1.5\n",
            title, phase_columns
        );
        fs::write(dir.join("Phase_mass_tbl.txt"), content).unwrap();
    }

    #[test]
    fn test_reduced_phase_name() {
        assert_eq!(reduced_phase_name("Augite_1"), "Augite");
        assert_eq!(reduced_phase_name("olivine_0_extra"), "olivine");
        assert_eq!(reduced_phase_name("spinel"), "spinel");
        assert_eq!(reduced_phase_name("_odd"), "_odd");
    }

    #[test]
    fn test_summary_counts_distinct_titles() {
        let parent = tempdir().unwrap();
        write_experiment(&parent.path().join("run1"), "Experiment A", "liquid_0 olivine_0");
        write_experiment(&parent.path().join("run2"), "Experiment B", "liquid_0 Augite_1");
        let summary = get_experiments_summary(parent.path(), false).unwrap();
        assert_eq!(summary.len(), 2);
        assert!(summary.get("Experiment A").is_some());
        assert!(summary.get("Experiment B").is_some());
    }

    #[test]
    fn test_title_collision_overwrites() {
        let parent = tempdir().unwrap();
        write_experiment(&parent.path().join("run1"), "Same Title", "liquid_0 olivine_0");
        write_experiment(&parent.path().join("run2"), "Same Title", "liquid_0 Augite_1");
        let summary = get_experiments_summary(parent.path(), false).unwrap();
        // colliding titles silently reduce the entry count; later directory wins
        assert_eq!(summary.len(), 1);
        let entry = summary.get("Same Title").unwrap();
        assert!(entry.phases.contains("Augite"));
        assert!(!entry.phases.contains("olivine"));
    }

    #[test]
    fn test_phases_are_reduced() {
        let parent = tempdir().unwrap();
        write_experiment(&parent.path().join("run1"), "Experiment A", "olivine_0 Augite_1");
        let summary = get_experiments_summary(parent.path(), false).unwrap();
        let entry = summary.get("Experiment A").unwrap();
        let expected: BTreeSet<String> = ["Augite", "olivine"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(entry.phases, expected);
    }

    #[test]
    fn test_write_summary_phaselist_padding() {
        let parent = tempdir().unwrap();
        write_experiment(&parent.path().join("run1"), "Short", "olivine_0");
        write_experiment(
            &parent.path().join("run2"),
            "A Much Longer Title",
            "Augite_1",
        );
        let summary = get_experiments_summary(parent.path(), false).unwrap();
        write_summary_phaselist(parent.path(), Some(&summary), DEFAULT_PHASELIST_FILENAME)
            .unwrap();

        let report =
            fs::read_to_string(parent.path().join(DEFAULT_PHASELIST_FILENAME)).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        let max_len = "A Much Longer Title".len();
        for line in &lines {
            let (name_field, phases) = line.split_at(max_len + 2);
            let name = name_field.trim_end();
            assert!(summary.get(name).is_some(), "unknown name {:?}", name);
            // the name field is padded to exactly max_len + 2 characters
            assert_eq!(name_field.len(), max_len + 2);
            assert!(!phases.starts_with(' '));
        }
        let short_line = lines.iter().find(|l| l.starts_with("Short")).unwrap();
        assert!(short_line.contains("olivine"));
        assert!(!short_line.contains("olivine_0"));
    }

    #[test]
    fn test_write_summary_phaselist_computes_when_absent() {
        let parent = tempdir().unwrap();
        write_experiment(&parent.path().join("run1"), "Solo", "olivine_0");
        write_summary_phaselist(parent.path(), None, DEFAULT_PHASELIST_FILENAME).unwrap();
        let report =
            fs::read_to_string(parent.path().join(DEFAULT_PHASELIST_FILENAME)).unwrap();
        assert!(report.starts_with("Solo"));
        assert!(report.contains("olivine"));
    }

    #[test]
    fn test_to_json_shape() {
        let parent = tempdir().unwrap();
        write_experiment(&parent.path().join("run1"), "Experiment A", "olivine_0");
        let summary = get_experiments_summary(parent.path(), false).unwrap();
        let value = summary.to_json();
        let entry = value.get("Experiment A").unwrap();
        assert!(entry.get("phases").unwrap().is_array());
        assert_eq!(
            entry.get("diagnostics").unwrap().as_array().unwrap().len(),
            8
        );
    }
}
