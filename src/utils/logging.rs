use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use once_cell::sync::Lazy;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_TO_FILE: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Lazy<Mutex<Option<std::fs::File>>> = Lazy::new(|| Mutex::new(None));

/// Initializes logging based on environment variables:
/// - OREBALANCE_LOGGING: enables/disables logging (true/false)
/// - OREBALANCE_LOG_TO_FILE: controls whether logs go to file or stdout (true/false, default false)
/// - OREBALANCE_LOG_FILE: path of the log file (default orebalance.log)
///
/// To enable logging in tests, run: OREBALANCE_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    match env::var("OREBALANCE_LOGGING") {
        Ok(value) => {
            match value.as_str() {
                "true" => {
                    ENABLE_LOGGING.store(true, Ordering::SeqCst);
                    if env::var("OREBALANCE_LOG_TO_FILE").unwrap_or_else(|_| "false".to_string()) == "true" {
                        let path = env::var("OREBALANCE_LOG_FILE").unwrap_or_else(|_| "orebalance.log".to_string());
                        match OpenOptions::new().create(true).append(true).open(&path) {
                            Ok(file) => {
                                if let Ok(mut guard) = LOG_FILE.lock() {
                                    *guard = Some(file);
                                    LOG_TO_FILE.store(true, Ordering::SeqCst);
                                }
                            }
                            // Fall back to stdout
                            Err(e) => eprintln!("Failed to open log file {}: {}", path, e),
                        }
                    }
                },
                "false" => ENABLE_LOGGING.store(false, Ordering::SeqCst),
                _ => panic!("\nError: OREBALANCE_LOGGING environment variable must be 'true' or 'false'\n\nTo run the program, use one of:\n  OREBALANCE_LOGGING=true cargo run\n  OREBALANCE_LOGGING=false cargo run\n"),
            }
        }
        Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
    }
}

/// Returns whether `init_logging` switched logging on.
pub fn is_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

pub fn log(prefix: &str, message: &str) {
    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }
    let log_message = format!("  [{}]   {}\n", prefix, message);

    if LOG_TO_FILE.load(Ordering::SeqCst) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                if let Err(e) = file.write_all(log_message.as_bytes()) {
                    eprintln!("Failed to write to log file: {}", e);
                }
                if let Err(e) = file.flush() {
                    eprintln!("Failed to flush log file: {}", e);
                }
            }
        }
    } else {
        print!("{}", log_message);
    }
}
