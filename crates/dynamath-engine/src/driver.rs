// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dynamath Tick Driver
// ─────────────────────────────────────────────────────────────────────
//! Fixed-rate background ticking of a shared engine.
//!
//! The driver owns one OS thread. Each iteration advances the engine under
//! its lock, hands the frame to a sink, then sleeps out the rest of the
//! interval. Control traffic goes through other clones of the same
//! `SharedEngine` and interleaves between ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use dynamath_types::TickFrame;

use crate::handle::SharedEngine;

/// Handle to a running tick loop.
///
/// Dropping the driver stops it and joins the thread.
pub struct TickDriver {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<u64>>,
}

impl TickDriver {
    /// Start ticking `engine` every `interval`, passing each frame to `sink`.
    ///
    /// The loop ends when `sink` returns `false` or `stop()` is called.
    pub fn spawn<F>(engine: SharedEngine, interval: Duration, mut sink: F) -> Self
    where
        F: FnMut(TickFrame) -> bool + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::spawn(move || {
            log::debug!("tick driver started: interval={interval:?}");
            let mut ticks = 0u64;
            while flag.load(Ordering::SeqCst) {
                let deadline = Instant::now() + interval;
                let frame = engine.advance();
                ticks += 1;
                if !sink(frame) {
                    break;
                }
                // Parked rather than slept so stop() can cut the wait short.
                loop {
                    let now = Instant::now();
                    if now >= deadline || !flag.load(Ordering::SeqCst) {
                        break;
                    }
                    thread::park_timeout(deadline - now);
                }
            }
            flag.store(false, Ordering::SeqCst);
            log::debug!("tick driver stopped after {ticks} ticks");
            ticks
        });

        Self {
            running,
            thread: Some(thread),
        }
    }

    /// Like `spawn`, with the interval taken from the engine's
    /// `tick_interval_ms`.
    pub fn spawn_with_config<F>(engine: SharedEngine, sink: F) -> Self
    where
        F: FnMut(TickFrame) -> bool + Send + 'static,
    {
        let interval = engine.tick_interval();
        Self::spawn(engine, interval, sink)
    }

    /// Whether the loop is still ticking.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Signal the loop to end and wait for the in-flight tick to finish.
    ///
    /// Returns the number of ticks the driver performed.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.running.store(false, Ordering::SeqCst);
        let Some(thread) = self.thread.take() else {
            return 0;
        };
        thread.thread().unpark();
        match thread.join() {
            Ok(ticks) => ticks,
            Err(_) => {
                log::error!("tick driver thread panicked");
                0
            }
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TickDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickDriver")
            .field("running", &self.is_running())
            .finish()
    }
}
