use std::io::{self, IsTerminal};
use std::process;

use vocab_upload::logging::{init_logging, LogConfig};
use vocab_upload::{run, FirestoreConfig, FirestoreStore, Progress, UploadConfig, UploadError};

fn main() {
    let log_config = LogConfig::default().with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        process::exit(1);
    }

    let config = UploadConfig::default();

    let store = match FirestoreStore::new(&FirestoreConfig::from_env(&config.project_id)) {
        Ok(s) => s,
        Err(error) => {
            eprintln!("Error: {error}");
            process::exit(1);
        }
    };

    let mut progress = Progress::stdout();

    let exit_code = match run(&config, &store, &mut progress) {
        Ok(_) => 0,
        Err(error @ UploadError::InputFileMissing { .. }) => {
            progress.line(format_args!("Error: {error}"));
            1
        }
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    };

    process::exit(exit_code);
}
