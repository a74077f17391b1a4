//! The frame processing loop.
//!
//! Each iteration acquires one frame, runs detection, renders the first result
//! (if any), shows the result and polls for the quit key:
//!
//! ```text
//! read ─None──────────────────────────────────────────────▶ Stopped(SourceExhausted)
//!   │Some(frame)
//!   ▼
//! detect ─▶ results.first() ─None─▶ raw frame ─┐
//!                  │Some(first)                 ├─▶ show ─▶ poll_key ─quit─▶ Stopped(QuitRequested)
//!                  └──▶ first.render_overlay ───┘                │other
//!                                                                ▼
//!                                                              read ...
//! ```
//!
//! The source and the display are owned by a `Session` guard for the whole run.
//! Dropping the guard releases the source and closes every display surface, so
//! both happen exactly once on every exit path, including `?` propagation and
//! unwinding.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use crate::config::LoopConfig;
use crate::detect::{Annotate, DetectorBackend};
use crate::display::DisplaySink;
use crate::ingest::FrameSource;

/// Wait handed to `DisplaySink::poll_key` every iteration.
pub const KEY_POLL_WAIT: Duration = Duration::from_millis(1);

const THROUGHPUT_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The source was not open, so no iteration ran.
    SourceNotOpened,
    /// The source returned no frame (end of stream or unreadable frame).
    SourceExhausted,
    /// The quit key was pressed.
    QuitRequested,
    /// The user closed the display surface.
    DisplayClosed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

/// Counters reported when the loop stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames_displayed: u64,
    pub frames_annotated: u64,
    /// Results beyond the first that were never rendered.
    pub results_discarded: u64,
    pub stop_reason: StopReason,
}

/// Drives a source, a detector and a display until the stream ends or the user quits.
pub struct FrameLoop<S, B, D> {
    config: LoopConfig,
    source: S,
    detector: B,
    display: D,
}

impl<S, B, D> FrameLoop<S, B, D>
where
    S: FrameSource,
    B: DetectorBackend,
    D: DisplaySink,
{
    pub fn new(config: LoopConfig, source: S, detector: B, display: D) -> Self {
        Self {
            config,
            source,
            detector,
            display,
        }
    }

    /// Run to completion. Collaborator errors are returned after the source
    /// and display have been released.
    pub fn run(self) -> Result<LoopSummary> {
        let FrameLoop {
            config,
            source,
            mut detector,
            display,
        } = self;
        let mut session = Session::new(source, display);
        let mut summary = LoopSummary {
            frames_displayed: 0,
            frames_annotated: 0,
            results_discarded: 0,
            stop_reason: StopReason::SourceNotOpened,
        };

        if !session.source.is_open() {
            log::warn!("frame loop: source is not open, nothing to process");
            session.release();
            return Ok(summary);
        }

        log::info!(
            "frame loop running: detector={} window='{}' quit key={:?}",
            detector.name(),
            config.window_title,
            config.quit_key
        );

        let started = Instant::now();
        let mut last_throughput_log = Instant::now();
        let mut state = LoopState::Running;

        while state == LoopState::Running {
            let Some(frame) = session.source.read() else {
                state = LoopState::Stopped(StopReason::SourceExhausted);
                break;
            };

            let frame_number = summary.frames_displayed + 1;
            let results = detector
                .detect(&frame)
                .with_context(|| format!("detection failed on frame {}", frame_number))?;

            let shown = match results.first() {
                None => frame,
                Some(first) => {
                    if results.len() > 1 {
                        log::debug!(
                            "frame {}: rendering first of {} results",
                            frame_number,
                            results.len()
                        );
                        summary.results_discarded += (results.len() - 1) as u64;
                    }
                    summary.frames_annotated += 1;
                    first.render_overlay(&frame).with_context(|| {
                        format!("overlay rendering failed on frame {}", frame_number)
                    })?
                }
            };

            session
                .display
                .show(&config.window_title, &shown)
                .context("display failed")?;
            summary.frames_displayed += 1;

            if last_throughput_log.elapsed() >= THROUGHPUT_LOG_INTERVAL {
                let secs = started.elapsed().as_secs_f64();
                log::info!(
                    "frame loop: {} frames, {:.1} fps",
                    summary.frames_displayed,
                    summary.frames_displayed as f64 / secs.max(f64::EPSILON)
                );
                last_throughput_log = Instant::now();
            }

            let key = session
                .display
                .poll_key(KEY_POLL_WAIT)
                .context("key poll failed")?;
            if key == Some(config.quit_key) {
                state = LoopState::Stopped(StopReason::QuitRequested);
            } else if !session.display.is_open() {
                state = LoopState::Stopped(StopReason::DisplayClosed);
            }
        }

        if let LoopState::Stopped(reason) = state {
            summary.stop_reason = reason;
        }
        session.release();
        log::info!(
            "frame loop stopped ({:?}) after {} frames",
            summary.stop_reason,
            summary.frames_displayed
        );
        Ok(summary)
    }
}

/// Scoped ownership of the loop's resources.
struct Session<S: FrameSource, D: DisplaySink> {
    source: S,
    display: D,
    released: bool,
}

impl<S: FrameSource, D: DisplaySink> Session<S, D> {
    fn new(source: S, display: D) -> Self {
        Self {
            source,
            display,
            released: false,
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.source.release();
        self.display.close_all();
    }
}

impl<S: FrameSource, D: DisplaySink> Drop for Session<S, D> {
    fn drop(&mut self) {
        self.release();
    }
}
