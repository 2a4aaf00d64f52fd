//! Tests for the Directory implementations
//!
//! These tests verify:
//! - Case-insensitive lookup
//! - Guarded insert and persistence of new rows
//! - Splitting of rows naming two countries
//! - File handling edge cases (missing file, malformed rows, no newline)
//! - Quoted fields holding commas

use std::fs;
use std::path::PathBuf;

use geodir::directory::{normalize_name, CsvDirectory, Directory, MemoryDirectory};
use geodir::GeoError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("countries_capitals.csv");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

fn setup_directory() -> (TempDir, CsvDirectory) {
    let (temp_dir, path) = write_file("Country,City\nFrance,Paris\nJapan,Tokyo\n");
    let directory = CsvDirectory::open(&path).unwrap();
    (temp_dir, directory)
}

// =============================================================================
// Name Normalization Tests
// =============================================================================

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("france"), "France");
    assert_eq!(normalize_name("FRANCE"), "France");
    assert_eq!(normalize_name("  birnin   ZANA "), "Birnin Zana");
    assert_eq!(normalize_name(""), "");
    assert_eq!(normalize_name("   "), "");
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_is_case_insensitive() {
    let (_temp, directory) = setup_directory();

    assert_eq!(directory.lookup("France").unwrap(), Some("Paris".to_string()));
    assert_eq!(directory.lookup("FRANCE").unwrap(), Some("Paris".to_string()));
    assert_eq!(directory.lookup("france").unwrap(), Some("Paris".to_string()));
    assert_eq!(directory.lookup(" france ").unwrap(), Some("Paris".to_string()));
}

#[test]
fn test_lookup_missing_country() {
    let (_temp, directory) = setup_directory();

    assert_eq!(directory.lookup("Atlantis").unwrap(), None);
}

#[test]
fn test_header_is_not_a_record() {
    let (_temp, directory) = setup_directory();

    assert_eq!(directory.lookup("Country").unwrap(), None);
    assert_eq!(directory.len(), 2);
}

#[test]
fn test_first_duplicate_row_wins() {
    let (_temp, path) = write_file("Country,City\nPeru,Lima\nPeru,Cusco\n");
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(directory.lookup("Peru").unwrap(), Some("Lima".to_string()));
    assert_eq!(directory.len(), 1);
}

#[test]
fn test_malformed_rows_are_skipped() {
    let (_temp, path) = write_file("Country,City\nnot a row\n,Nowhere\n\nChile,Santiago\n");
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(directory.len(), 1);
    assert_eq!(directory.lookup("Chile").unwrap(), Some("Santiago".to_string()));
}

#[test]
fn test_open_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = CsvDirectory::open(temp_dir.path().join("missing.csv"));

    assert!(matches!(result, Err(GeoError::Directory(_))));
}

// =============================================================================
// Insert Tests
// =============================================================================

#[test]
fn test_insert_new_country() {
    let (_temp, directory) = setup_directory();

    assert!(directory.insert("wakanda", "birnin zana").unwrap());
    assert_eq!(
        directory.lookup("Wakanda").unwrap(),
        Some("Birnin Zana".to_string())
    );
    assert_eq!(directory.len(), 3);
}

#[test]
fn test_insert_existing_country_is_rejected() {
    let (_temp, directory) = setup_directory();

    assert!(!directory.insert("FRANCE", "Lyon").unwrap());
    assert_eq!(directory.lookup("France").unwrap(), Some("Paris".to_string()));
    assert_eq!(directory.len(), 2);

    let contents = fs::read_to_string(directory.path()).unwrap();
    assert_eq!(contents.matches("France").count(), 1);
}

#[test]
fn test_insert_persists_across_reopen() {
    let (_temp, directory) = setup_directory();
    directory.insert("Wakanda", "Birnin Zana").unwrap();
    let path = directory.path().to_path_buf();
    drop(directory);

    let reopened = CsvDirectory::open(&path).unwrap();
    assert_eq!(
        reopened.lookup("wakanda").unwrap(),
        Some("Birnin Zana".to_string())
    );
}

#[test]
fn test_insert_into_file_without_trailing_newline() {
    let (_temp, path) = write_file("Country,City\nFrance,Paris");
    let directory = CsvDirectory::open(&path).unwrap();

    directory.insert("Japan", "Tokyo").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Country,City\nFrance,Paris\nJapan,Tokyo\n");
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[test]
fn test_normalize_splits_joined_countries() {
    let (_temp, path) = write_file(
        "Country,City\nFrance,Paris\nTrinidad and Tobago,Port of Spain\nJapan,Tokyo\n",
    );
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(directory.normalize().unwrap(), 1);

    assert_eq!(
        directory.lookup("Trinidad").unwrap(),
        Some("Port of Spain".to_string())
    );
    assert_eq!(
        directory.lookup("Tobago").unwrap(),
        Some("Port of Spain".to_string())
    );
    assert_eq!(directory.lookup("Trinidad and Tobago").unwrap(), None);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "Country,City\nFrance,Paris\nTrinidad,Port of Spain\nTobago,Port of Spain\nJapan,Tokyo\n"
    );
}

#[test]
fn test_normalize_is_idempotent() {
    let (_temp, path) = write_file("Country,City\nBosnia and Herzegovina,Sarajevo\n");
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(directory.normalize().unwrap(), 1);
    assert_eq!(directory.normalize().unwrap(), 0);
    assert_eq!(directory.len(), 2);
}

#[test]
fn test_normalize_without_joined_rows_leaves_file_alone() {
    let original = "Country,City\nFrance,Paris\n\n";
    let (_temp, path) = write_file(original);
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(directory.normalize().unwrap(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

// =============================================================================
// Quoting Tests
// =============================================================================

#[test]
fn test_quoted_country_with_comma() {
    let (_temp, path) = write_file("Country,City\n\"Korea, South\",Seoul\nFrance,Paris\n");
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(
        directory.lookup("Korea, South").unwrap(),
        Some("Seoul".to_string())
    );
    assert_eq!(directory.lookup("\"Korea").unwrap(), None);
    assert_eq!(directory.len(), 2);
}

#[test]
fn test_insert_quotes_city_with_comma() {
    let (_temp, directory) = setup_directory();

    assert!(directory.insert("Narnia", "Cair, Paravel").unwrap());

    let path = directory.path().to_path_buf();
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with("Narnia,\"Cair, Paravel\"\n"));
    drop(directory);

    let reopened = CsvDirectory::open(&path).unwrap();
    assert_eq!(
        reopened.lookup("narnia").unwrap(),
        Some("Cair, Paravel".to_string())
    );
    assert_eq!(reopened.len(), 3);
}

#[test]
fn test_normalize_rewrite_keeps_quoting() {
    let (_temp, path) = write_file(
        "Country,City\n\"Korea, South\",Seoul\nTrinidad and Tobago,Port of Spain\n",
    );
    let directory = CsvDirectory::open(&path).unwrap();

    assert_eq!(directory.normalize().unwrap(), 1);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "Country,City\n\"Korea, South\",Seoul\nTrinidad,Port of Spain\nTobago,Port of Spain\n"
    );

    let reopened = CsvDirectory::open(&path).unwrap();
    assert_eq!(
        reopened.lookup("korea, south").unwrap(),
        Some("Seoul".to_string())
    );
}

// =============================================================================
// Memory Directory Tests
// =============================================================================

#[test]
fn test_memory_directory_contract() {
    let directory = MemoryDirectory::with_records([
        ("France", "Paris"),
        ("Antigua and Barbuda", "St. John's"),
    ]);

    assert_eq!(directory.lookup("france").unwrap(), Some("Paris".to_string()));
    assert!(directory.insert("peru", "lima").unwrap());
    assert!(!directory.insert("Peru", "Cusco").unwrap());
    assert_eq!(directory.lookup("PERU").unwrap(), Some("Lima".to_string()));

    assert_eq!(directory.normalize().unwrap(), 1);
    assert_eq!(
        directory.lookup("Barbuda").unwrap(),
        Some("St. John's".to_string())
    );
    assert_eq!(directory.len(), 4);
}

#[test]
fn test_memory_directory_starts_empty() {
    let directory = MemoryDirectory::new();

    assert!(directory.is_empty());
    assert_eq!(directory.lookup("France").unwrap(), None);
}
