use crate::Examples::melts_examples::melts_examples;
use crate::Melts::summary::{
    DEFAULT_PHASELIST_FILENAME, get_experiments_summary, write_summary_phaselist,
};
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::io::{self, Write};
use std::path::Path;

pub fn run_interactive_menu() {
    SimpleLogger::init(LevelFilter::Info, Config::default()).ok();
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => summarize_menu(),
            "2" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n Wellcome to GeoMelts: Toolkit for reading and aggregating\n
    alphaMELTS thermodynamic-modeling table outputs \n \x1b[0m"
    );
    println!("\x1b[33m1. Summarize experiment directory\x1b[0m");
    println!("\x1b[33m2. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

fn summarize_menu() {
    print!("\x1b[36mPath to the directory of experiment folders: \x1b[0m");
    io::stdout().flush().unwrap();
    let path_input = get_user_input();
    let parent = Path::new(path_input.trim());
    match get_experiments_summary(parent, false) {
        Ok(summary) => {
            summary.pretty_print();
            match write_summary_phaselist(parent, Some(&summary), DEFAULT_PHASELIST_FILENAME) {
                Ok(()) => println!(
                    "Phase list written to {}",
                    parent.join(DEFAULT_PHASELIST_FILENAME).display()
                ),
                Err(e) => println!("Could not write phase list: {}", e),
            }
        }
        Err(e) => println!("Could not read directory {}: {}", parent.display(), e),
    }
}

fn examples_menu() {
    print!("\x1b[36mExample number (0-2): \x1b[0m");
    io::stdout().flush().unwrap();
    let choice = get_user_input();
    match choice.trim().parse::<usize>() {
        Ok(task) => melts_examples(task),
        Err(_) => println!("Invalid example number."),
    }
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}
