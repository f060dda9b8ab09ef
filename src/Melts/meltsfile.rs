//! # MELTS Input File Module
//!
//! ## Aim
//! Serializes an experiment definition (title, starting oxide composition,
//! initial conditions, calculation mode) into the alphaMELTS input-file
//! format, and reads the JSON task-dictionary shape used by the web
//! service front end (`title`, `initialize` oxide map,
//! `constraints.setTP.{initialT,initialP}`, `calculationMode`).

use crate::Geochem::ind::is_common_oxide;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// An alphaMELTS experiment definition. Composition order is preserved as
/// given so the written file matches the source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeltsFile {
    pub title: String,
    /// (oxide, wt%) pairs
    pub initial_composition: Vec<(String, f64)>,
    pub initial_temperature: Option<f64>,
    pub initial_pressure: Option<f64>,
    pub calculation_mode: Option<String>,
}

impl MeltsFile {
    pub fn new(title: &str) -> Self {
        MeltsFile {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Set an oxide in the starting composition, replacing an existing
    /// entry. Unknown oxide names are warn-logged but kept.
    pub fn set_oxide(&mut self, oxide: &str, wt: f64) {
        if !is_common_oxide(oxide) {
            warn!("Oxide '{}' is not in the common oxide set", oxide);
        }
        match self
            .initial_composition
            .iter_mut()
            .find(|(name, _)| name == oxide)
        {
            Some(entry) => entry.1 = wt,
            None => self.initial_composition.push((oxide.to_string(), wt)),
        }
    }

    /// Build from a JSON task dictionary. The title may be a plain string
    /// or a one-element array (the web format wraps it in a tuple).
    pub fn from_json_value(value: &Value) -> Result<MeltsFile, String> {
        let title = match value.get("title") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .first()
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or("task document has an empty title array".to_string())?,
            _ => return Err("task document has no title".to_string()),
        };
        let mut melts_file = MeltsFile::new(&title);
        if let Some(init) = value.get("initialize").and_then(Value::as_object) {
            for (oxide, wt) in init {
                match wt.as_f64() {
                    Some(w) => melts_file.set_oxide(oxide, w),
                    None => {
                        return Err(format!(
                            "initialize entry '{}' is not a number: {}",
                            oxide, wt
                        ));
                    }
                }
            }
        }
        if let Some(set_tp) = value
            .get("constraints")
            .and_then(|c| c.get("setTP"))
            .and_then(Value::as_object)
        {
            melts_file.initial_temperature = set_tp.get("initialT").and_then(Value::as_f64);
            melts_file.initial_pressure = set_tp.get("initialP").and_then(Value::as_f64);
        }
        melts_file.calculation_mode = value
            .get("calculationMode")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(melts_file)
    }

    /// Render the alphaMELTS input-file text.
    pub fn to_melts_string(&self) -> String {
        let mut lines: Vec<String> = vec![format!("Title: {}", self.title)];
        for (oxide, wt) in &self.initial_composition {
            lines.push(format!("Initial Composition: {} {}", oxide, wt));
        }
        if let Some(t) = self.initial_temperature {
            lines.push(format!("Initial Temperature: {}", t));
        }
        if let Some(p) = self.initial_pressure {
            lines.push(format!("Initial Pressure: {}", p));
        }
        if let Some(mode) = &self.calculation_mode {
            lines.push(format!("Mode: {}", mode));
        }
        lines.join("\n")
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_melts_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn task_document() -> Value {
        json!({
            "title": ["TestREST"],
            "initialize": {
                "SiO2": 48.68,
                "TiO2": 1.01,
                "MgO": 9.10,
                "FeO": 7.59
            },
            "calculationMode": "findLiquidus",
            "constraints": {"setTP": {"initialT": 1200, "initialP": 1000}}
        })
    }

    #[test]
    fn test_from_json_value() {
        let melts_file = MeltsFile::from_json_value(&task_document()).unwrap();
        assert_eq!(melts_file.title, "TestREST");
        assert_eq!(melts_file.initial_composition.len(), 4);
        assert_eq!(melts_file.initial_temperature, Some(1200.0));
        assert_eq!(melts_file.initial_pressure, Some(1000.0));
        assert_eq!(melts_file.calculation_mode.as_deref(), Some("findLiquidus"));
    }

    #[test]
    fn test_from_json_value_requires_title() {
        let result = MeltsFile::from_json_value(&json!({"initialize": {}}));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no title"));
    }

    #[test]
    fn test_to_melts_string_layout() {
        let melts_file = MeltsFile::from_json_value(&task_document()).unwrap();
        let text = melts_file.to_melts_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title: TestREST");
        assert!(lines.contains(&"Initial Composition: SiO2 48.68"));
        assert!(lines.contains(&"Initial Temperature: 1200"));
        assert!(lines.contains(&"Initial Pressure: 1000"));
        assert_eq!(*lines.last().unwrap(), "Mode: findLiquidus");
    }

    #[test]
    fn test_set_oxide_replaces() {
        let mut melts_file = MeltsFile::new("X");
        melts_file.set_oxide("MgO", 9.10);
        melts_file.set_oxide("MgO", 10.0);
        assert_eq!(melts_file.initial_composition.len(), 1);
        assert_eq!(melts_file.initial_composition[0].1, 10.0);
    }

    #[test]
    fn test_write_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.melts");
        let melts_file = MeltsFile::from_json_value(&task_document()).unwrap();
        melts_file.write(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Title: TestREST"));
    }
}
