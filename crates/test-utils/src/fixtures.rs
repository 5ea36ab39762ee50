//! Common fixtures for heatmap tests.

use std::io::{self, Write};

/// Common bounding boxes as (west, south, east, north).
pub mod bbox {
    /// Continental United States
    pub const CONUS: (f64, f64, f64, f64) = (-130.0, 20.0, -60.0, 55.0);
}

/// External image URL used by single-file overlay tests.
pub const TEST_IMAGE_URL: &str = "http://www.example.com/thing.png";

/// A sink that accepts `remaining` bytes and then fails.
///
/// The write that crosses the limit is accepted partially and reports an
/// error, like a disk filling up mid-write.
#[derive(Debug)]
pub struct FailingWriter {
    remaining: usize,
    written: Vec<u8>,
}

impl FailingWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            remaining: limit,
            written: Vec::new(),
        }
    }

    /// Bytes accepted before the failure.
    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "sink is full"));
        }
        let n = buf.len().min(self.remaining);
        self.written.extend_from_slice(&buf[..n]);
        self.remaining -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
