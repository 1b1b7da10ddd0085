//! Pausing between batches.

use crate::error::PipelineError;
use async_trait::async_trait;
use std::io::{self, BufRead};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// What to do after a batch has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Stop,
}

/// Asked between batches whether the run should go on.
///
/// Never asked after the final batch.
#[async_trait]
pub trait BatchGate: Send {
    /// `completed` batches of `total` are on disk.
    async fn confirm(&mut self, completed: u64, total: u64) -> Result<GateDecision, PipelineError>;
}

/// Never pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoContinue;

#[async_trait]
impl BatchGate for AutoContinue {
    async fn confirm(&mut self, _completed: u64, _total: u64) -> Result<GateDecision, PipelineError> {
        Ok(GateDecision::Continue)
    }
}

/// A stop request that outlives any single pause.
///
/// Once triggered it stays triggered. Clones share the same state.
#[derive(Debug, Clone)]
pub struct StopSignal {
    state: Arc<watch::Sender<bool>>,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn trigger(&self) {
        self.state.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the signal has been triggered.
    pub async fn triggered(&self) {
        let mut state = self.state.subscribe();
        loop {
            let stopped = *state.borrow_and_update();
            if stopped || state.changed().await.is_err() {
                return;
            }
        }
    }

    /// Trigger on Ctrl+C for as long as the runtime lives.
    ///
    /// Installing the listener replaces the default SIGINT behaviour, so a
    /// Ctrl+C during batch work is recorded here and honoured at the next
    /// pause.
    pub fn on_ctrl_c(&self) -> JoinHandle<()> {
        let stop = self.clone();
        tokio::spawn(async move {
            loop {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Ctrl+C received, stopping at the next batch boundary");
                        stop.trigger();
                    }
                    Err(e) => {
                        warn!("Failed to listen for Ctrl+C: {}", e);
                        return;
                    }
                }
            }
        })
    }
}

/// Waits for a line of input: an empty line continues, `q` stops. End of
/// input and a triggered [`StopSignal`] also stop.
///
/// Lines are read off the async runtime and handed over through a channel,
/// so a pending read never holds up a stop or runtime shutdown.
pub struct InteractiveGate {
    lines: mpsc::Receiver<io::Result<String>>,
    stop: StopSignal,
}

impl InteractiveGate {
    /// Read confirmations from standard input on a dedicated thread.
    pub fn stdin(stop: StopSignal) -> Result<Self, PipelineError> {
        let (tx, lines) = mpsc::channel(1);
        std::thread::Builder::new()
            .name("confirm-stdin".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let failed = line.is_err();
                    if tx.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
            })
            .map_err(PipelineError::Gate)?;
        Ok(Self { lines, stop })
    }

    /// Read confirmations from an async reader on a runtime task.
    pub fn from_reader<R>(reader: R, stop: StopSignal) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, lines) = mpsc::channel(1);
        tokio::spawn(async move {
            let mut reader = BufReader::new(reader).lines();
            loop {
                let line = match reader.next_line().await {
                    Ok(Some(line)) => Ok(line),
                    Ok(None) => break,
                    Err(e) => Err(e),
                };
                let failed = line.is_err();
                if tx.send(line).await.is_err() || failed {
                    break;
                }
            }
        });
        Self { lines, stop }
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }
}

#[async_trait]
impl BatchGate for InteractiveGate {
    async fn confirm(&mut self, completed: u64, total: u64) -> Result<GateDecision, PipelineError> {
        if self.stop.is_triggered() {
            info!("Stop requested before batch {} of {}", completed + 1, total);
            return Ok(GateDecision::Stop);
        }

        println!(
            "Batch {completed}/{total} written. Press Enter to continue, or 'q' / Ctrl+C to stop."
        );

        let decision = tokio::select! {
            biased;
            _ = self.stop.triggered() => GateDecision::Stop,
            line = self.lines.recv() => match line {
                Some(Ok(line)) if line.trim().eq_ignore_ascii_case("q") => GateDecision::Stop,
                Some(Ok(_)) => GateDecision::Continue,
                Some(Err(e)) => return Err(PipelineError::Gate(e)),
                None => {
                    info!("Confirmation input closed");
                    GateDecision::Stop
                }
            },
        };
        Ok(decision)
    }
}
