//! Spinner for calls that can take a while, such as routine generation

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const SPINNER_UPDATE_INTERVAL_MS: u64 = 100;
const CLEAR_LINE_WIDTH: usize = 100;

pub struct ProgressSpinner {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressSpinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn start(&mut self) {
        self.running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.running);
        let message = self.message.clone();

        let handle = thread::spawn(move || {
            let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut index = 0;

            while running.load(Ordering::Relaxed) {
                print!("\r{} {}", spinner_chars[index], message);
                let _ = io::stdout().flush();

                index = (index + 1) % spinner_chars.len();
                thread::sleep(Duration::from_millis(SPINNER_UPDATE_INTERVAL_MS));
            }

            print!("\r{:<width$}\r", "", width = CLEAR_LINE_WIDTH);
            let _ = io::stdout().flush();
        });

        self.handle = Some(handle);
    }

    pub fn stop(&mut self, completion_message: Option<&str>) {
        self.running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        if let Some(msg) = completion_message {
            // Leading space keeps wide emoji from being clipped
            println!(" {}", msg);
        }
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.stop(None);
    }
}

/// Print `✅ success_message` or `❌ error_prefix: error`
pub fn display_operation_result<T, E: std::fmt::Display>(
    result: &Result<T, E>,
    success_message: &str,
    error_prefix: &str,
) {
    match result {
        Ok(_) => println!("✅ {}", success_message),
        Err(e) => println!("❌ {}: {}", error_prefix, e),
    }
}
