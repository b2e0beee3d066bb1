//! Test logging and the test-output sink

use std::io::{self, Write};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DOCFIX_LOG";

static INIT_LOGGING: Once = Once::new();

/// Install a fmt subscriber writing through the test harness
///
/// Safe to call from every test; only the first call installs anything.
/// Filter comes from `DOCFIX_LOG` (default `warn`).
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        // Another subscriber may already be installed by the test binary
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Line prefix of the test-output sink
pub const TEST_OUTPUT_PREFIX: &str = "[          ] ";

/// Writer that prints whole lines to stdout, each behind a gtest-style prefix
///
/// Goes through `print!` so the test harness captures it per test.
#[derive(Debug, Default)]
pub struct TestOutput {
    pending: Vec<u8>,
}

impl TestOutput {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    fn emit_complete_lines(&mut self) {
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            print!("{}{}", TEST_OUTPUT_PREFIX, String::from_utf8_lossy(&line));
        }
    }
}

impl Write for TestOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.emit_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.pending.push(b'\n');
            self.emit_complete_lines();
        }
        Ok(())
    }
}
