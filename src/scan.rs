//! Column-by-column scanner shared by every filter.
//!
//! A pass allocates a result of the source's dimensions and fills it column
//! by column, outer x and inner y. Before each column the cancel token is
//! checked and progress `x * 100 / width` is reported, so a 10-wide image
//! reports 0, 10, ..., 90.
//!
//! ## Parallelism
//!
//! With [`ScanOptions::parallel`] the rows of one column are computed on the
//! rayon pool and written back by the scanning thread. Progress and
//! cancellation cadence stay once per column and the output is identical to
//! the serial scan.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::Cancelled;
use crate::filters::Filter;

// ============================================================================
// Progress and cancellation
// ============================================================================

/// Receives the percentage of completed columns of the current pass.
pub trait ProgressSink {
    fn report(&mut self, percent: u8);

    /// Called before pass `pass` of a chain starts.
    fn begin_pass(&mut self, _pass: usize) {}
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// Cooperative cancellation flag, shared between the caller and a pass.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that running and future passes stop before their next column.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-pass execution options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Compute the rows of each column on the rayon pool.
    pub parallel: bool,
    /// Return the partially written buffer inside [`Cancelled`].
    pub keep_partial: bool,
}

impl ScanOptions {
    pub fn parallel() -> Self {
        ScanOptions { parallel: true, ..Self::default() }
    }

    pub fn with_keep_partial(mut self, keep: bool) -> Self {
        self.keep_partial = keep;
        self
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Run one serial pass with default options.
pub fn run<P: ProgressSink>(
    filter: &Filter,
    source: &PixelBuffer,
    progress: &mut P,
    cancel: &CancelToken,
) -> Result<PixelBuffer, Cancelled> {
    run_with(filter, source, progress, cancel, ScanOptions::default())
}

/// Run one pass of `filter` over `source`.
pub fn run_with<P: ProgressSink>(
    filter: &Filter,
    source: &PixelBuffer,
    progress: &mut P,
    cancel: &CancelToken,
    options: ScanOptions,
) -> Result<PixelBuffer, Cancelled> {
    let width = source.width();
    let height = source.height();
    debug!(
        filter = filter.name(),
        width,
        height,
        parallel = options.parallel,
        "filter pass started"
    );

    let mut result = source.blank_like();
    let mut column: Vec<Rgb> = Vec::with_capacity(height);

    for x in 0..width {
        if cancel.is_cancelled() {
            debug!(filter = filter.name(), completed_columns = x, "filter pass cancelled");
            return Err(Cancelled {
                completed_columns: x,
                partial: options.keep_partial.then_some(result),
            });
        }

        let percent = (x * 100 / width) as u8;
        trace!(column = x, percent, "column");
        progress.report(percent);

        if options.parallel {
            (0..height)
                .into_par_iter()
                .map(|y| filter.apply(source, x, y))
                .collect_into_vec(&mut column);
            for (y, color) in column.iter().enumerate() {
                result.set(x, y, *color);
            }
        } else {
            for y in 0..height {
                result.set(x, y, filter.apply(source, x, y));
            }
        }
    }

    debug!(filter = filter.name(), width, height, "filter pass finished");
    Ok(result)
}

/// Run `filters` as sequential passes, each reading the previous output.
///
/// An empty chain returns a copy of `source`. Cancellation in any pass ends
/// the chain.
pub fn run_chain<P: ProgressSink>(
    filters: &[Filter],
    source: &PixelBuffer,
    progress: &mut P,
    cancel: &CancelToken,
    options: ScanOptions,
) -> Result<PixelBuffer, Cancelled> {
    let mut current = source.clone();
    for (pass, filter) in filters.iter().enumerate() {
        progress.begin_pass(pass);
        current = run_with(filter, &current, progress, cancel, options)?;
    }
    Ok(current)
}
