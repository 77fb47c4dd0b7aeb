//! Cooperative year ticker for the animation mode.
//!
//! The ticker advances through a fixed list of years, calling back once per
//! year and sleeping a fixed interval between calls. It stops early when the
//! callback breaks or when a [`StopHandle`] is triggered from anywhere else;
//! the stop flag is checked before every tick and while waiting.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep between stop-flag checks.
const POLL_SLICE: Duration = Duration::from_millis(25);

/// Cancels a running [`YearTicker`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How a ticker run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Every year was shown.
    Completed { ticks: usize },
    /// Stopped before the end; `last_year` is the last year shown.
    Stopped {
        ticks: usize,
        last_year: Option<i32>,
    },
}

#[derive(Debug)]
pub struct YearTicker {
    years: Vec<i32>,
    interval: Duration,
    stop: StopHandle,
}

impl YearTicker {
    pub fn new(years: Vec<i32>, interval: Duration) -> Self {
        Self {
            years,
            interval,
            stop: StopHandle::default(),
        }
    }

    /// Restrict to years within `[from, to]`; either bound may be open.
    #[must_use]
    pub fn within(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.years
            .retain(|y| from.is_none_or(|f| *y >= f) && to.is_none_or(|t| *y <= t));
        self
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Step through the years, calling `on_tick` for each.
    pub fn run<F>(&self, mut on_tick: F) -> TickOutcome
    where
        F: FnMut(i32) -> ControlFlow<()>,
    {
        let mut ticks = 0usize;
        let mut last_year = None;
        for (idx, &year) in self.years.iter().enumerate() {
            if self.stop.is_stopped() {
                return TickOutcome::Stopped { ticks, last_year };
            }
            let flow = on_tick(year);
            ticks += 1;
            last_year = Some(year);
            if flow.is_break() {
                self.stop.stop();
                return TickOutcome::Stopped { ticks, last_year };
            }
            if idx + 1 < self.years.len() && !self.wait() {
                return TickOutcome::Stopped { ticks, last_year };
            }
        }
        TickOutcome::Completed { ticks }
    }

    /// Sleep for the interval. Returns false if stopped while waiting.
    fn wait(&self) -> bool {
        let deadline = Instant::now() + self.interval;
        loop {
            if self.stop.is_stopped() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(POLL_SLICE));
        }
    }
}
