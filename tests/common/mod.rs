//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header lines written before the entries, like a dict.cc export
pub const HEADER_LINES: usize = 8;

/// Small German/French dictionary with known characteristics
///
/// 14 entries, 12 nouns, 10 with a gender tag on both sides:
/// - full table (m, f, n) x (m, f) = [[1, 2], [3, 1], [2, 1]]
/// - grouped table (n -> m) (m, f) x (m, f) = [[3, 3], [3, 1]]
pub const DICTIONARY_ENTRIES: &[[&str; 4]] = &[
    ["Haus {n}", "maison {f}", "noun", ""],
    ["Tisch {m}", "table {f}", "noun", ""],
    ["Tür {f}", "porte {f}", "noun", ""],
    ["Baum {m}", "arbre {m}", "noun", ""],
    ["Buch {n}", "livre {m}", "noun", ""],
    ["Sonne {f}", "soleil {m}", "noun", ""],
    ["Mond {m}", "lune {f}", "noun", ""],
    ["Kind {n}", "enfant {m}", "noun", ""],
    ["Hose {f}", "pantalon {m}", "noun", ""],
    ["Leute {pl}", "gens {m.pl}", "noun", ""],
    ["foo", "bar {f}", "noun", ""],
    ["gehen", "aller", "verb", ""],
    ["schnell", "rapide", "adj", "[ugs.]"],
    ["Schere {f}", "ciseaux {m.pl}", "noun", ""],
];

/// Write a dictionary file with a `#` header block followed by `entries`.
pub fn write_dictionary(dir: &TempDir, name: &str, header_lines: usize, entries: &[[&str; 4]]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();

    for i in 0..header_lines {
        writeln!(file, "# header line {} - compiled for tests", i + 1).unwrap();
    }
    for entry in entries {
        writeln!(file, "{}", entry.join("\t")).unwrap();
    }

    path
}

/// Create a temporary directory holding the standard fixture dictionary
pub fn create_fixture_dictionary() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_dictionary(&temp_dir, "de_fr.txt", HEADER_LINES, DICTIONARY_ENTRIES);
    (temp_dir, path)
}

/// Owned label vector from string slices
pub fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "Expected {} (±{}), got {}",
        expected,
        tolerance,
        actual
    );
}
