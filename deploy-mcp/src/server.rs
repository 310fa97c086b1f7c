//! The request/response loop over stdin/stdout.
//!
//! Two consumption modes share the same per-request logic: interactive
//! callers get a single request/response exchange, piped callers get a loop
//! that survives per-request errors and ends at end-of-input. Requests are
//! handled strictly one at a time, in arrival order.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info};

use crate::{
    handler::Handler,
    protocol::{Request, Response},
};

/// Input-consumption mode for the server loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read a single request, respond, exit.
    Interactive,
    /// Read consecutive requests until end-of-input.
    Piped,
}

impl Mode {
    /// Pick a mode from what stdin is attached to: a terminal gets the
    /// single-shot exchange, a pipe gets the read loop.
    pub fn detect() -> Self {
        if std::io::stdin().is_terminal() {
            Mode::Interactive
        } else {
            Mode::Piped
        }
    }
}

pub struct Server {
    handler: Handler,
    mode: Mode,
}

impl Server {
    pub fn new(handler: Handler, mode: Mode) -> Self {
        Self { handler, mode }
    }

    /// Serve requests from stdin, writing responses to stdout.
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        info!(mode = ?self.mode, "serving requests");
        match self.mode {
            Mode::Interactive => self.run_interactive(stdin, stdout).await,
            Mode::Piped => self.run_piped(stdin, stdout).await,
        }
    }

    async fn run_interactive<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let line = lines
            .next_line()
            .await
            .context("Failed to read request from stdin")?;

        let response = match line {
            Some(line) => self.dispatch_line(&line).await,
            None => {
                error!("no input received");
                Response::error("No input received")
            }
        };

        write_response(&mut output, &response).await
    }

    async fn run_piped<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut handled: usize = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read request from stdin")?
        {
            if line.trim().is_empty() {
                continue;
            }

            let response = self.dispatch_line(&line).await;
            write_response(&mut output, &response).await?;
            handled += 1;
        }

        info!(handled, "end of input, shutting down");
        Ok(())
    }

    /// Per-request logic shared by both modes: a malformed line becomes an
    /// error response, never a dead loop or a dead process.
    async fn dispatch_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handler.process(request).await,
            Err(err) => {
                error!(error = %err, "malformed request line");
                Response::error(format!("Error parsing request: {err}"))
            }
        }
    }
}

async fn write_response<W>(output: &mut W, response: &Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response).context("Failed to serialize response")?;
    line.push(b'\n');

    output
        .write_all(&line)
        .await
        .context("Failed to write response to stdout")?;
    output.flush().await.context("Failed to flush stdout")?;

    Ok(())
}
