use drinkviz::ChartError;
use drinkviz::core::{DEFAULT_KEY_COLUMN, Dataset, Record};

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/drinks_sample.csv")
}

#[test]
fn fixture_loads_unique_keys_in_file_order() {
    let dataset = Dataset::from_csv_path(fixture_path(), DEFAULT_KEY_COLUMN).expect("load");

    assert_eq!(dataset.len(), 10);
    assert_eq!(dataset.key_column(), "country");
    assert_eq!(
        dataset.columns(),
        [
            "beer_servings",
            "spirit_servings",
            "wine_servings",
            "total_litres_of_pure_alcohol"
        ]
    );
    let keys = dataset.keys();
    assert_eq!(keys.first().copied(), Some("Afghanistan"));
    assert_eq!(keys.last().copied(), Some("Bhutan"));
}

#[test]
fn fixture_report_lists_every_defect() {
    let dataset = Dataset::from_csv_path(fixture_path(), DEFAULT_KEY_COLUMN).expect("load");
    let report = dataset.report();

    assert_eq!(report.rows_read, 12);
    assert_eq!(report.skipped_empty_keys, 1);
    assert_eq!(report.duplicate_keys, vec!["Albania".to_owned()]);
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.key, "Bhutan");
    assert_eq!(issue.field, "beer_servings");
    assert_eq!(issue.raw, "n/a");
    assert_eq!(issue.row, 9);
    assert!(!report.is_clean());
}

#[test]
fn duplicate_key_keeps_first_occurrence() {
    let dataset = Dataset::from_csv_path(fixture_path(), DEFAULT_KEY_COLUMN).expect("load");
    let index = dataset.position("Albania").expect("albania");
    let albania = dataset.record(index).expect("record");
    assert_eq!(albania.value("beer_servings"), 89);
}

#[test]
fn values_are_coerced_with_integer_prefix_semantics() {
    let dataset = Dataset::from_csv_path(fixture_path(), DEFAULT_KEY_COLUMN).expect("load");
    let total = |key: &str| {
        let index = dataset.position(key).expect("key present");
        dataset
            .record(index)
            .expect("record")
            .value("total_litres_of_pure_alcohol")
    };

    assert_eq!(total("Albania"), 4);
    assert_eq!(total("Andorra"), 12);
    assert_eq!(total("Afghanistan"), 0);
    let bhutan = dataset.record(dataset.position("Bhutan").expect("bhutan")).expect("record");
    assert_eq!(bhutan.value("beer_servings"), 0);
}

#[test]
fn key_lookup_is_case_sensitive() {
    let dataset = Dataset::from_csv_path(fixture_path(), DEFAULT_KEY_COLUMN).expect("load");
    assert!(dataset.position("Andorra").is_some());
    assert_eq!(dataset.position("andorra"), None);
    assert_eq!(dataset.position("Atlantis"), None);
}

#[test]
fn missing_key_column_is_reported() {
    let err = Dataset::from_csv_str("name,beer_servings\nA,1\n", DEFAULT_KEY_COLUMN)
        .expect_err("no country column");
    match err {
        ChartError::MissingColumn { column } => assert_eq!(column, "country"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_only_input_yields_empty_dataset() {
    let dataset = Dataset::from_csv_str("country,beer_servings\n", DEFAULT_KEY_COLUMN)
        .expect("header only");
    assert!(dataset.is_empty());
    assert!(dataset.keys().is_empty());
    assert!(dataset.report().is_clean());
}

#[test]
fn short_rows_default_missing_cells_to_zero() {
    let dataset = Dataset::from_csv_str(
        "country,beer_servings,wine_servings\nA,3\n",
        DEFAULT_KEY_COLUMN,
    )
    .expect("load");
    let record = dataset.record(0).expect("record");
    assert_eq!(record.value("beer_servings"), 3);
    assert_eq!(record.value("wine_servings"), 0);
    assert_eq!(dataset.report().issues.len(), 1);
}

#[test]
fn custom_key_column_is_supported() {
    let dataset = Dataset::from_csv_str("name,total\nX,4\nY,5\n", "name").expect("load");
    assert_eq!(dataset.keys(), vec!["X", "Y"]);
    assert_eq!(dataset.columns(), ["total"]);
}

#[test]
fn from_records_drops_duplicates_like_csv_loading() {
    let dataset = Dataset::from_records(
        DEFAULT_KEY_COLUMN,
        vec![
            Record::new("A").with_field("beer_servings", 1),
            Record::new("B").with_field("beer_servings", 2),
            Record::new("A").with_field("beer_servings", 3),
        ],
    );
    assert_eq!(dataset.keys(), vec!["A", "B"]);
    assert_eq!(dataset.record(0).expect("A").value("beer_servings"), 1);
    assert_eq!(dataset.report().duplicate_keys, vec!["A".to_owned()]);
}
