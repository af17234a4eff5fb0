//! Replay of recorded `<code> <path>` lines

use super::EventSource;
use crate::stop::StopSignal;
use filewatch_core::{Error, RawChange, Result, WatchRequest};
use std::io::BufRead;
use tracing::trace;

/// Source reading one change per line from a reader
///
/// Line format is `<code> <path>`; the path is everything after the first
/// run of whitespace, so it may itself contain spaces. Blank lines and
/// lines starting with `#` are skipped.
pub struct ReplaySource<R> {
    reader: R,
    line_no: usize,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }

    fn parse_line(&self, line: &str) -> Result<RawChange> {
        let malformed = || Error::MalformedChange {
            line: self.line_no,
            content: line.to_string(),
        };

        let (code, path) = line.split_once(char::is_whitespace).ok_or_else(malformed)?;
        let path = path.trim();
        if path.is_empty() {
            return Err(malformed());
        }
        let code: i64 = code.parse().map_err(|_| malformed())?;

        Ok(RawChange::new(code, path))
    }
}

impl<R: BufRead> EventSource for ReplaySource<R> {
    fn start(&mut self, _request: &WatchRequest) -> Result<()> {
        Ok(())
    }

    fn next_batch(&mut self, stop: &StopSignal) -> Result<Option<Vec<RawChange>>> {
        let mut line = String::new();

        loop {
            if stop.is_stopped() {
                return Ok(None);
            }

            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let change = self.parse_line(trimmed)?;
            trace!(line = self.line_no, code = change.code, "Replayed change");
            return Ok(Some(vec![change]));
        }
    }
}
