use crate::{GeometryError, Progress, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ignores progress and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {}

/// A cancellation flag that can be shared with another thread.
#[derive(Debug, Default, Clone)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl Progress for CancelFlag {
    fn should_cancel(&self) -> bool {
        self.is_cancelled()
    }
}

/// Drives a [`Progress`] from a loop over `total` items.
///
/// `tick` is cheap on most iterations; every ~1% of `total` it reports the
/// percentage and polls for cancellation.
pub struct Ticker<'a, P: Progress + ?Sized> {
    progress: &'a mut P,
    stage: &'static str,
    total: usize,
    step: usize,
    next: usize,
}

impl<'a, P: Progress + ?Sized> Ticker<'a, P> {
    pub fn new(progress: &'a mut P, stage: &'static str, total: usize) -> Self {
        let step = (total / 100).max(1);
        Self {
            progress,
            stage,
            total,
            step,
            next: step,
        }
    }

    /// Records that `done` items are complete.
    #[inline]
    pub fn tick(&mut self, done: usize) -> Result<()> {
        if done < self.next {
            return Ok(());
        }
        self.next = done + self.step;
        if self.progress.should_cancel() {
            return Err(GeometryError::Cancelled);
        }
        let percent = ((done as f64 / self.total.max(1) as f64) * 100.0).min(100.0) as u8;
        self.progress.report_progress(self.stage, percent);
        Ok(())
    }

    /// Polls for cancellation and reports 100%.
    pub fn finish(self) -> Result<()> {
        if self.progress.should_cancel() {
            return Err(GeometryError::Cancelled);
        }
        self.progress.report_progress(self.stage, 100);
        Ok(())
    }
}

/// Returns `Err(Cancelled)` if the caller asked to stop.
#[inline]
pub fn check_cancelled<P: Progress + ?Sized>(progress: &P) -> Result<()> {
    if progress.should_cancel() {
        Err(GeometryError::Cancelled)
    } else {
        Ok(())
    }
}
