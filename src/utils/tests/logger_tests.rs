//! Tests for the file logger

extern crate std;

use std::fs;
use log::{Level, LevelFilter, Log, Metadata};

use crate::utils::logger::Logger;

fn log_path(name: &str) -> std::string::String {
    let dir = std::env::temp_dir().join("geoslice-tests");
    fs::create_dir_all(&dir).unwrap();
    dir.join(format!("{}-{}.log", name, std::process::id()))
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_log_block_writes_indented_lines() {
    let path = log_path("block");
    let logger = Logger::new(&path).unwrap();
    logger
        .log_block("Inspection:", &["Variable LST".to_string(), "Latitude: 4 values".to_string()])
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: std::vec::Vec<&str> = contents.lines().collect();
    std::assert_eq!(lines.len(), 3);
    std::assert!(lines[0].ends_with(" Inspection:"));
    std::assert!(lines[1].ends_with("   Variable LST"));
}

#[test]
fn test_level_filter() {
    let logger = Logger::new(&log_path("level")).unwrap();
    let debug = Metadata::builder().level(Level::Debug).build();
    let warn = Metadata::builder().level(Level::Warn).build();
    std::assert!(!logger.enabled(&debug));
    std::assert!(logger.enabled(&warn));

    let verbose = logger.with_level(LevelFilter::Debug);
    std::assert!(verbose.enabled(&debug));
}
