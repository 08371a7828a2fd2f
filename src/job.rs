//! Background execution of an [`Operation`] on its own thread.
//!
//! The worker owns a copy of the source image, forwards progress over an
//! mpsc channel and honors cancellation at column boundaries. Composites run
//! both passes on the same worker, one after the other.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::Cancelled;
use crate::filters::Operation;
use crate::scan::{CancelToken, ProgressSink, ScanOptions};

/// Message sent from a running job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEvent {
    /// Column progress of pass `pass` (0 for the first pass).
    Progress { pass: usize, percent: u8 },
}

struct ChannelSink {
    tx: Sender<JobEvent>,
    pass: usize,
}

impl ProgressSink for ChannelSink {
    fn report(&mut self, percent: u8) {
        // Nobody listening is fine; the job still runs to completion.
        let _ = self.tx.send(JobEvent::Progress { pass: self.pass, percent });
    }

    fn begin_pass(&mut self, pass: usize) {
        self.pass = pass;
    }
}

/// Handle to an operation running on a worker thread.
pub struct FilterJob {
    cancel: CancelToken,
    events: Receiver<JobEvent>,
    handle: JoinHandle<Result<PixelBuffer, Cancelled>>,
}

impl FilterJob {
    pub fn spawn(operation: Operation, source: PixelBuffer, options: ScanOptions) -> Self {
        Self::spawn_with_cancel(operation, source, options, CancelToken::new())
    }

    /// Like [`FilterJob::spawn`], observing a caller-owned token.
    pub fn spawn_with_cancel(
        operation: Operation,
        source: PixelBuffer,
        options: ScanOptions,
        cancel: CancelToken,
    ) -> Self {
        let (tx, events) = mpsc::channel();
        let token = cancel.clone();

        debug!(operation = operation.name(), "spawning filter job");
        let handle = thread::spawn(move || {
            let mut sink = ChannelSink { tx, pass: 0 };
            operation.run(&source, &mut sink, &token, options)
        });

        FilterJob { cancel, events, handle }
    }

    /// Ask the worker to stop before its next column.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Progress events; the iterator ends once the worker has finished.
    pub fn events(&self) -> &Receiver<JobEvent> {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return its result.
    ///
    /// A panic on the worker is resumed on the calling thread.
    pub fn join(self) -> Result<PixelBuffer, Cancelled> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}
