use std::fs;
use std::path::Path;

use rental_charges::app::pipeline::run_calc;
use rental_charges::domain::{CalcConfig, TOTAL_DAYS, TOTAL_PRICE, UNIT_COST};
use rental_charges::io::load_rentals;
use rental_charges::logging::{LogConfig, Logger};
use serde_json::{Value, json};

const SAMPLE: &str = r#"{
    "RNT001": {"product_code": "PRD80", "units_rented": 8, "price_per_day": 31,
               "rental_start": "6/12/17", "rental_end": "6/22/17"},
    "RNT002": {"product_code": "PRD11", "units_rented": 1, "price_per_day": 16,
               "rental_start": "2/13/17", "rental_end": "1/1/17"},
    "RNT003": {"product_code": "PRD22", "price_per_day": 4,
               "rental_start": "3/01/18", "rental_end": "3/05/18"},
    "RNT004": {"product_code": "PRD54", "units_rented": 4, "price_per_day": 2.5,
               "rental_start": "12/30/19", "rental_end": "01/02/20"}
}"#;

fn config(dir: &Path) -> CalcConfig {
    let input = dir.join("rentals.json");
    fs::write(&input, SAMPLE).unwrap();
    CalcConfig {
        input,
        output: dir.join("out.json"),
        export_csv: None,
    }
}

#[test]
fn writes_every_record_and_derives_valid_ones() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let out = run_calc(&config).unwrap();
    assert!(out.written);
    assert_eq!(out.report.derived, vec!["RNT001", "RNT004"]);
    assert_eq!(out.report.skipped.len(), 2);

    let written: Value = serde_json::from_str(&fs::read_to_string(&config.output).unwrap()).unwrap();
    let records = written.as_object().unwrap();
    assert_eq!(records.len(), 4);

    assert_eq!(records["RNT001"][TOTAL_DAYS], json!(10));
    assert_eq!(records["RNT001"][TOTAL_PRICE], json!(310));
    assert_eq!(records["RNT001"][UNIT_COST], json!(38.75));

    assert_eq!(records["RNT004"][TOTAL_DAYS], json!(3));
    assert_eq!(records["RNT004"][TOTAL_PRICE], json!(7.5));

    assert!(records["RNT002"].get(TOTAL_DAYS).is_none());
    assert!(records["RNT003"].get(TOTAL_PRICE).is_none());
    assert_eq!(records["RNT003"]["product_code"], json!("PRD22"));
}

#[test]
fn rerunning_on_output_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let first = config(dir.path());
    run_calc(&first).unwrap();

    let second = CalcConfig {
        input: first.output.clone(),
        output: dir.path().join("again.json"),
        export_csv: None,
    };
    run_calc(&second).unwrap();

    assert_eq!(
        load_rentals(&first.output).unwrap(),
        load_rentals(&second.output).unwrap()
    );
}

#[test]
fn missing_input_is_fatal_with_exit_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = CalcConfig {
        input: dir.path().join("absent.json"),
        output: dir.path().join("out.json"),
        export_csv: None,
    };

    let err = run_calc(&config).unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(!config.output.exists());
}

#[test]
fn unwritable_output_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.output = dir.path().join("no_such_dir").join("out.json");

    let out = run_calc(&config).unwrap();
    assert!(!out.written);
    assert_eq!(out.batch.len(), 4);
}

#[test]
fn unwritable_output_logs_one_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("valid.json");
    fs::write(
        &input,
        r#"{"RNT001": {"units_rented": 2, "price_per_day": 10, "rental_start": "01/01/20", "rental_end": "01/11/20"}}"#,
    )
    .unwrap();
    let config = CalcConfig {
        input,
        output: dir.path().join("no_such_dir").join("out.json"),
        export_csv: None,
    };

    let logger = Logger::from_config(&LogConfig {
        enabled: true,
        dir: dir.path().join("logs"),
    })
    .unwrap();
    let out = logger.scope(|| run_calc(&config)).unwrap();
    assert!(!out.written);
    assert_eq!(out.report.derived, vec!["RNT001"]);

    let text = fs::read_to_string(logger.file().unwrap()).unwrap();
    let errors: Vec<&str> = text
        .lines()
        .filter(|line| line.split_whitespace().nth(1) == Some("ERROR"))
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Failed to open output file"));
}

#[test]
fn csv_export_has_a_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    let csv_path = dir.path().join("summary.csv");
    config.export_csv = Some(csv_path.clone());

    run_calc(&config).unwrap();

    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.lines().nth(1).unwrap().starts_with("RNT001,6/12/17,6/22/17,10,310,"));
}
