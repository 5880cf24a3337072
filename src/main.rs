extern crate log;
extern crate pretty_env_logger;

use std::collections::BTreeMap;
use std::path::Path;
use std::process::exit;

use clap::{arg, command, Command};
use rayon::prelude::*;
use serde::Serialize;

use omr_grader::grade::{grade, AnswerKey, GradeReport};
use omr_grader::interpret::{interpret_sheet, Options};
use omr_grader::sheet::SheetConfig;
use omr_grader::types::DetectedAnswer;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetResult<'a> {
    sheet: &'a str,
    answers: &'a BTreeMap<u32, DetectedAnswer>,
    grade: GradeReport,
}

fn main() {
    pretty_env_logger::init_custom_env("LOG");

    let matches = cli().get_matches();
    let debug = matches.get_flag("debug");
    let key_path = matches
        .get_one::<String>("key")
        .expect("answer key path is required");
    let sheet_paths = matches
        .get_many::<String>("sheet_paths")
        .expect("at least one sheet image path is required")
        .collect::<Vec<&String>>();

    let key_json = match std::fs::read_to_string(key_path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error reading answer key: {}", e);
            exit(1);
        }
    };
    let key: AnswerKey = match serde_json::from_str(&key_json) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error parsing answer key: {}", e);
            exit(1);
        }
    };

    let config = match matches.get_one::<String>("config") {
        None => SheetConfig::default(),
        Some(config_path) => {
            let config_json = match std::fs::read_to_string(config_path) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error reading sheet config: {}", e);
                    exit(1);
                }
            };
            match serde_json::from_str(&config_json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing sheet config: {}", e);
                    exit(1);
                }
            }
        }
    };

    let options = Options { debug, config };

    // Sheets are independent of each other; only the answer key is shared,
    // and it is read-only from here on.
    let results = sheet_paths
        .par_iter()
        .map(|path| (*path, interpret_sheet(Path::new(path.as_str()), &options)))
        .collect::<Vec<_>>();

    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(interpretation) => {
                let report = grade(&interpretation.answers, &key);
                let sheet_result = SheetResult {
                    sheet: path.as_str(),
                    answers: &interpretation.answers,
                    grade: report,
                };
                match serde_json::to_string_pretty(&sheet_result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing result for {}: {}", path, e);
                        failures += 1;
                    }
                }
            }
            Err(e) => {
                // one bad scan must not take the rest of the batch down
                eprintln!("Error: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        exit(1);
    }
}

#[allow(clippy::cognitive_complexity)]
fn cli() -> Command {
    command!()
        .arg(arg!(-k --key <PATH> "Path to answer_key.json file").required(true))
        .arg(arg!(-c --config <PATH> "Path to an optional sheet config JSON file"))
        .arg(arg!(-d --debug "Write debug overlay images next to each sheet"))
        .arg(
            arg!(sheet_paths: <SHEETS> "Paths to scanned sheet images")
                .num_args(1..)
                .required(true),
        )
}
