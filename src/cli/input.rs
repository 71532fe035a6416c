//! Line input for the daemon

use std::io::{self, BufRead};

use async_trait::async_trait;

use crate::core::{NavigatorError, Result};

/// A source of newline-delimited task lines
#[async_trait]
pub trait LineSource: Send {
    /// Next raw line, or `None` at end of input
    async fn next_line(&mut self) -> Result<Option<String>>;
}

/// Reads stdin one line per call on the blocking pool
///
/// The runtime thread stays free while waiting, so output already flushed is
/// delivered and signals are handled. Nothing is read ahead.
#[derive(Debug, Default)]
pub struct StdinLines;

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> Result<Option<String>> {
        let read = tokio::task::spawn_blocking(|| -> io::Result<Option<String>> {
            let mut line = String::new();
            let n = io::stdin().lock().read_line(&mut line)?;
            Ok((n > 0).then_some(line))
        })
        .await
        .map_err(|e| NavigatorError::with_context("stdin reader", e))?;

        Ok(read?)
    }
}
