use std::fs;
use std::sync::Arc;

use symptom_core::{ClassifierError, ClassifierService, CoreConfig, Urgency};
use tempfile::TempDir;

fn service(temp: &TempDir) -> ClassifierService {
    let cfg = CoreConfig::new(temp.path().join("models"), 3).unwrap();
    ClassifierService::new(Arc::new(cfg))
}

fn write_dataset(temp: &TempDir, rows: &[(&str, &str)]) -> std::path::PathBuf {
    let path = temp.path().join("dataset.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["label", "text"]).unwrap();
    for (label, text) in rows {
        writer.write_record([label, text]).unwrap();
    }
    writer.flush().unwrap();
    path
}

#[test]
fn test_four_row_dataset_ranks_flu_first() {
    let temp = TempDir::new().unwrap();
    let dataset = write_dataset(
        &temp,
        &[
            ("Flu", "Fever, cough and chills"),
            ("Flu", "High fever with a dry cough"),
            ("Migraine", "Throbbing headache and nausea"),
            ("Migraine", "Severe headache, nausea and blurred vision"),
        ],
    );
    let service = service(&temp);

    let accuracy = service.train(&dataset).unwrap();
    let predictions = service.predict("I have a fever and a bad cough", 3).unwrap();

    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(predictions[0].condition, "Flu");
    assert!(predictions[0].probability > 0.5);
}

#[test]
fn test_saved_model_predicts_identically_after_reload() {
    let temp = TempDir::new().unwrap();
    let dataset = write_dataset(
        &temp,
        &[
            ("Psoriasis", "red itchy scaly patches on my elbows"),
            ("Psoriasis", "itchy scaly skin with silver patches"),
            ("Psoriasis", "scaly red patches that itch"),
            ("Diabetes", "always thirsty and urinating often"),
            ("Diabetes", "very thirsty, tired and urinating at night"),
            ("Diabetes", "blurred vision and always thirsty"),
            ("Common Cold", "runny nose and sneezing"),
            ("Common Cold", "sneezing with a sore throat"),
            ("Common Cold", "blocked runny nose and mild sore throat"),
        ],
    );
    let text = "itchy red patches and a runny nose";

    let trained = service(&temp);
    trained.train(&dataset).unwrap();
    let before = trained.predict(text, 3).unwrap();

    let reloaded = service(&temp);
    assert!(reloaded.load().unwrap());
    let after = reloaded.predict(text, 3).unwrap();

    assert_eq!(before, after);
    assert_eq!(
        reloaded.predict("so thirsty all day", 1).unwrap()[0].urgency,
        Urgency::Urgent
    );
}

#[test]
fn test_dataset_errors_are_reported() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    let missing = service.train(&temp.path().join("nope.csv"));
    assert!(missing.is_err_and(|e| e.is_dataset_load()));

    let path = temp.path().join("bad.csv");
    fs::write(&path, "symptoms,condition\nfever,Flu\n").unwrap();
    let bad_columns = service.train(&path);
    assert!(bad_columns.is_err_and(|e| e.is_dataset_load()));

    let path = temp.path().join("empty.csv");
    fs::write(&path, "text,label\n\"I am ok\",Healthy\n\"it is\",Healthy\n").unwrap();
    let all_empty = service.train(&path);
    assert!(matches!(all_empty, Err(ClassifierError::Training(_))));
}

#[test]
fn test_empty_store_is_not_found() {
    let temp = TempDir::new().unwrap();
    let service = service(&temp);

    assert!(!service.load().unwrap());
    assert!(matches!(
        service.predict("fever", 3),
        Err(ClassifierError::ModelNotTrained)
    ));
}
