use crate::logger::LogSink;

use std::path::PathBuf;

#[test]
fn test_log_file_takes_precedence_over_colors() {
    let sink = LogSink::new(Some(PathBuf::from("xenship.log")), true);
    assert_eq!(sink, LogSink::File(PathBuf::from("xenship.log")));
}

#[test]
fn test_without_file_logs_to_stderr() {
    assert_eq!(LogSink::new(None, false), LogSink::Stderr { colored: false });
}
