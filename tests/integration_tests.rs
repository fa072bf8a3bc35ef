use purple_air_report::dataset::Dataset;
use purple_air_report::error::DatasetError;
use purple_air_report::loader::read_readings;
use purple_air_report::menu::Session;
use purple_air_report::report::render;
use purple_air_report::stats::Statistic;
use std::io::Cursor;

fn fixture_dataset() -> Dataset {
    let bytes = include_bytes!("fixtures/sample_readings.csv");
    let readings = read_readings(&bytes[..]).expect("Failed to parse fixture");
    let mut dataset = Dataset::new();
    dataset.load(readings);
    dataset
}

fn row<'a>(table: &'a str, zip: &str) -> Option<&'a str> {
    table.lines().find(|line| line.starts_with(zip))
}

#[test]
fn test_labels_from_fixture() {
    let dataset = fixture_dataset();

    let zips = dataset.get_zip_states();
    assert_eq!(zips.len(), 3);
    assert!(zips.iter().all(|(_, active)| *active));
    assert_eq!(dataset.time_labels(), ["Morning", "Midday", "Evening"]);
}

#[test]
fn test_min_table() {
    let table = render(&fixture_dataset(), Statistic::Min);

    assert_eq!(
        table.lines().next(),
        Some("        Morning    Midday   Evening")
    );
    assert_eq!(row(&table, "94022"), Some("94022      2.20      1.00      3.20"));
    assert_eq!(row(&table, "94040"), Some("94040      1.00       N/A       N/A"));
    assert_eq!(row(&table, "12345"), Some("12345      1.10       N/A       N/A"));
}

#[test]
fn test_avg_for_repeated_readings() {
    let dataset = fixture_dataset();

    let summary = dataset.statistics_for("94040", "Morning").unwrap();
    assert_eq!(summary.avg, 2.0);

    let table = render(&dataset, Statistic::Avg);
    assert_eq!(row(&table, "94040"), Some("94040      2.00       N/A       N/A"));
}

#[test]
fn test_toggled_zip_leaves_report() {
    let mut dataset = fixture_dataset();
    let before = render(&dataset, Statistic::Max);

    dataset.toggle_zip("94022").unwrap();

    for stat in [Statistic::Min, Statistic::Avg, Statistic::Max] {
        let table = render(&dataset, stat);
        assert!(row(&table, "94022").is_none());
    }
    let after = render(&dataset, Statistic::Max);
    assert_eq!(row(&after, "12345"), row(&before, "12345"));
    assert_eq!(row(&after, "94040"), row(&before, "94040"));
}

#[test]
fn test_rejected_header_keeps_previous() {
    let mut dataset = Dataset::with_header("CLEAN AIR 2022").unwrap();
    let result = dataset.set_header("x".repeat(31));

    assert!(matches!(result, Err(DatasetError::Validation { .. })));
    assert_eq!(dataset.header(), "CLEAN AIR 2022");
}

#[test]
fn test_no_matching_items_vs_empty_dataset() {
    assert_eq!(
        Dataset::new().statistics_for("12345", "Morning"),
        Err(DatasetError::EmptyDataset)
    );
    assert!(matches!(
        fixture_dataset().statistics_for("12345", "Evening"),
        Err(DatasetError::NoMatchingItems { .. })
    ));
}

#[test]
fn test_menu_session_end_to_end() {
    let path = format!(
        "{}/tests/fixtures/sample_readings.csv",
        env!("CARGO_MANIFEST_DIR")
    );
    let long_header = "y".repeat(31);
    let script = format!("Audrey\n{long_header}\nCLEAN AIR 2022\n2\n5\n2\n4\n2\n\n3\n9\n");

    let mut session = Session::new(Dataset::new(), path, Cursor::new(script), Vec::new());
    session.run(None).unwrap();
    let (dataset, output) = session.into_parts();
    let out = String::from_utf8(output).unwrap();

    assert_eq!(dataset.header(), "CLEAN AIR 2022");
    assert!(out.contains("Please load a dataset first"));
    assert!(out.contains("6 lines loaded"));
    assert!(out.contains("94022      2.20      1.00      3.20"));
    assert!(out.contains("2: 94022  INACTIVE"));

    // The max table comes after the filter screen and must not list 94022.
    let max_table = out.rsplit("What is your choice? ").nth(1).unwrap();
    assert!(max_table.contains("94040      3.00       N/A       N/A"));
    assert!(!max_table.contains("94022 "));
    assert!(out.ends_with("Goodbye! Thank you for using the database.\n"));
}
