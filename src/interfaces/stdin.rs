use crate::domain::ports::{EventSource, SessionStep};
use crate::error::{LandingError, Result};
use crate::interfaces::csv::script_reader;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};

/// Feeds session steps from an async line stream, typically stdin in live
/// mode. One `event,target,value` line per step; blank lines are skipped so
/// a terminal session can be paced by hand.
pub struct LineSource<R> {
    lines: Lines<BufReader<R>>,
    line_no: u64,
}

impl<R: AsyncRead + Unpin + Send> LineSource<R> {
    pub fn new(source: R) -> Self {
        Self {
            lines: BufReader::new(source).lines(),
            line_no: 0,
        }
    }
}

/// The live-mode source: whatever arrives on the process's stdin.
pub fn stdin_source() -> LineSource<Stdin> {
    LineSource::new(tokio::io::stdin())
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> EventSource for LineSource<R> {
    async fn next_step(&mut self) -> Option<Result<SessionStep>> {
        loop {
            // Counted only once the read completes: next_line is cancel safe
            // and this method gets dropped and re-created inside select!.
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    self.line_no += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(script_reader::parse_line(&line).map_err(|reason| {
                        LandingError::ScriptError {
                            line: self.line_no,
                            reason,
                        }
                    }));
                }
                Ok(None) => return None,
                Err(err) => return Some(Err(LandingError::IoError(err))),
            }
        }
    }
}
