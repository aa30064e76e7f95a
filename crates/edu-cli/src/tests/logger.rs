use crate::logger;

use edu_config::LogLevel;

use log::LevelFilter;

#[test]
fn given_log_file_in_missing_directory_when_initialized_then_file_is_written() {
    // Given
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("log").join("edu.log");

    // When
    let result = logger::initialize(LogLevel(LevelFilter::Info), Some(path.clone()), false);
    log::info!("hello from the logger test");
    log::logger().flush();

    // Then
    assert!(result.is_ok());
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("hello from the logger test"));
}
