use crate::Melts::meltsfile::MeltsFile;
use crate::Melts::output::MeltsOutput;
use crate::Melts::summary::{
    DEFAULT_PHASELIST_FILENAME, get_experiments_summary, write_summary_phaselist,
};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Write a small synthetic alphaMELTS experiment directory so the examples
/// run without real model output on disk.
pub fn write_demo_experiment(dir: &Path, title: &str) {
    fs::create_dir_all(dir).unwrap();
    let bulk = format!(
        "Title: {}\n\nBulk composition:\nPressure Temperature SiO2 MgO FeO CaO\n\
         1000.0 1473.15 48.68 9.10 7.59 12.45\n\
         1000.0 1453.15 49.10 8.50 7.80 12.30\n",
        title
    );
    fs::write(dir.join("Bulk_comp_tbl.txt"), bulk).unwrap();
    let phasemass = format!(
        "Title: {}\n\nPhase masses:\nPressure Temperature mass liquid_0 olivine_0 Augite_1\n\
         1000.0 1473.15 100.0 98.5 1.5 0.0\n\
         1000.0 1453.15 100.0 93.0 5.0 2.0\n",
        title
    );
    fs::write(dir.join("Phase_mass_tbl.txt"), phasemass).unwrap();
    let phasemain = format!(
        "Title: {}\n\n\
         olivine_0 thermodynamic data and composition:\n\
         Pressure Temperature mass formula\n\
         1000.0 1473.15 1.5 Fe''0.18Mg1.82SiO4\n\
         1000.0 1453.15 5.0 Fe''0.20Mg1.80SiO4\n\n\
         liquid_0 thermodynamic data and composition:\n\
         Pressure Temperature mass SiO2\n\
         1000.0 1473.15 98.5 48.68\n\
         1000.0 1453.15 95.0 49.10\n",
        title
    );
    fs::write(dir.join("Phase_main_tbl.txt"), phasemain).unwrap();
}

pub fn melts_examples(meltstask: usize) {
    //

    match meltstask {
        0 => {
            // parse one synthetic experiment directory and inspect it
            let dir = tempfile::tempdir().unwrap();
            write_demo_experiment(dir.path(), "Demo experiment");
            let output = MeltsOutput::from_directory(dir.path(), false);
            println!("advertised tables {:?} \n", output.tables());
            println!("discovered phases {:?} \n", output.phasenames);
            println!("majors {:?} \n", output.majors);
            output.pretty_print();
            output.bulkcomp.pretty_print();
        }
        1 => {
            // aggregate two experiments and write the phase-list report
            let parent = tempfile::tempdir().unwrap();
            write_demo_experiment(&parent.path().join("run1"), "Fractional run");
            write_demo_experiment(&parent.path().join("run2"), "Equilibrium run");
            let summary = get_experiments_summary(parent.path(), false).unwrap();
            summary.pretty_print();
            write_summary_phaselist(parent.path(), Some(&summary), DEFAULT_PHASELIST_FILENAME)
                .unwrap();
            let report =
                fs::read_to_string(parent.path().join(DEFAULT_PHASELIST_FILENAME)).unwrap();
            println!("{}", report);
            println!("{}", summary.to_json());
        }
        2 => {
            // build an alphaMELTS input file from a JSON task document
            let task = json!({
                "title": ["TestREST"],
                "initialize": {
                    "SiO2": 48.68, "TiO2": 1.01, "Al2O3": 17.64, "Fe2O3": 0.89,
                    "FeO": 7.59, "MgO": 9.10, "CaO": 12.45, "Na2O": 2.65,
                    "K2O": 0.03, "P2O5": 0.08, "H2O": 0.20
                },
                "calculationMode": "findLiquidus",
                "constraints": {"setTP": {"initialT": 1200, "initialP": 1000}}
            });
            let melts_file = MeltsFile::from_json_value(&task).unwrap();
            println!("{}", melts_file.to_melts_string());
        }
        _ => println!("no such example"),
    }
}
