// Runs in its own binary: `init` installs the process-wide logger, which the
// unit tests' `TestLogger` would otherwise already occupy.

use std::fs;

use rbmap::logging::{self, LogConfig};
use rbmap::{LoggingError, RBTree};
use simplelog::LevelFilter;

#[test]
fn init_writes_file_and_refuses_second_logger() {
    let dir = std::env::temp_dir().join(format!("rbmap-logging-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    // a missing directory fails before any logger is installed
    let missing_dir = dir.join("nope").join("x.log");
    let missing = LogConfig::default().with_file(missing_dir, LevelFilter::Debug);
    assert!(matches!(logging::init(&missing), Err(LoggingError::Io(_))));

    let path = dir.join("rbmap_debug.log");
    let config = LogConfig::default().with_file(&path, LevelFilter::Debug);
    logging::init(&config).unwrap();

    let mut tree = RBTree::new();
    tree.insert(1, ()).unwrap();
    assert!(tree.insert(1, ()).is_err());

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("inserted root node 0"), "{contents}");
    assert!(contents.contains("rejected duplicate key"), "{contents}");

    assert!(matches!(logging::init(&config), Err(LoggingError::SetLogger(_))));

    fs::remove_dir_all(&dir).unwrap();
}
