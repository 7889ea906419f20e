use std::io;
use std::path::PathBuf;

use archetyper::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigurationError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::UnclassifiedFileError { file: "src/logo.png".to_string() };
    assert_eq!(
        err.to_string(),
        "File found that is neither binary nor text file: 'src/logo.png'."
    );
}

#[test]
fn test_copy_error_keeps_source() {
    let err = Error::CopyError {
        source_file: PathBuf::from("a.txt"),
        destination: PathBuf::from("out/a.txt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().starts_with("Error copying file from 'a.txt' to 'out/a.txt'"));
    assert!(std::error::Error::source(&err).is_some());
}
