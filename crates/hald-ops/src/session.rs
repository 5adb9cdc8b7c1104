//! Single-flight grading for interactive callers.
//!
//! A slider dragged across its range fires far more requests than the engine
//! can finish. [`GradeSession`] lets at most one job run at a time and drops
//! (never queues) requests that arrive while it is busy. The last request
//! made after the worker frees up is the one that runs.
//!
//! Delivery happens on the worker thread through the caller's callback;
//! forward the result to whatever context owns the display (a channel into a
//! UI loop, for instance). The busy flag is released only after the callback
//! returns, so two results can never race each other into shared state.
//!
//! # Example
//!
//! ```rust
//! use std::sync::mpsc;
//! use hald_core::PixelBuffer;
//! use hald_lut::LutCube;
//! use hald_ops::session::{GradeSession, Submission};
//!
//! let session = GradeSession::new(PixelBuffer::filled(8, 8, [10, 20, 30, 255]), LutCube::identity());
//! let (tx, rx) = mpsc::channel();
//!
//! if let Submission::Started(job) = session.submit(0.6, move |res| { let _ = tx.send(res); }).unwrap() {
//!     job.wait().unwrap();
//! }
//! let graded = rx.recv().unwrap().unwrap();
//! assert_eq!(graded.dimensions(), (8, 8));
//! assert!(!session.is_busy());
//! ```

use crate::{transform_cube, EngineResult, GradeOptions, Intensity, SessionError};
use hald_core::{ImageView, PixelBuffer};
use hald_lut::LutCube;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, trace};

/// Whether a session currently has a job in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready to accept a request.
    Idle,
    /// A job is running; new requests are dropped.
    Busy,
}

/// Outcome of [`GradeSession::submit`].
#[derive(Debug)]
#[must_use]
pub enum Submission {
    /// The request was accepted and is running.
    Started(GradeJob),
    /// Another job was in flight; the request was discarded.
    Dropped,
}

impl Submission {
    /// Returns `true` if the request was accepted.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// Handle to a running job.
///
/// Dropping it detaches the job; it still runs to completion.
#[derive(Debug)]
pub struct GradeJob {
    handle: thread::JoinHandle<()>,
}

impl GradeJob {
    /// Blocks until the job has delivered its result and released the session.
    ///
    /// Returns `Err` with the panic payload if the delivery callback panicked.
    pub fn wait(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Clears the busy flag when dropped, including during unwinding.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds one source image and one decoded LUT for repeated grading.
///
/// The engine itself stays stateless; the session owns the only piece of
/// mutable state, the idle/busy token.
#[derive(Debug)]
pub struct GradeSession {
    source: Arc<PixelBuffer>,
    cube: Arc<LutCube>,
    options: GradeOptions,
    busy: Arc<AtomicBool>,
}

impl GradeSession {
    /// Creates an idle session.
    pub fn new(source: PixelBuffer, cube: LutCube) -> Self {
        Self {
            source: Arc::new(source),
            cube: Arc::new(cube),
            options: GradeOptions::default(),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a session, decoding the LUT strip once up front.
    pub fn from_strip(source: PixelBuffer, lut: ImageView<'_>) -> EngineResult<Self> {
        let cube = LutCube::decode(lut)?;
        Ok(Self::new(source, cube))
    }

    /// Sets the engine options used by later submissions.
    pub fn with_options(mut self, options: GradeOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the ungraded source, e.g. for a before/after comparison.
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Returns the decoded LUT.
    pub fn cube(&self) -> &LutCube {
        &self.cube
    }

    /// Returns the current state token.
    pub fn state(&self) -> SessionState {
        if self.busy.load(Ordering::Acquire) {
            SessionState::Busy
        } else {
            SessionState::Idle
        }
    }

    /// Returns `true` while a job is in flight.
    pub fn is_busy(&self) -> bool {
        self.state() == SessionState::Busy
    }

    /// Starts a grading job unless one is already running.
    ///
    /// `deliver` receives the result on the worker thread, success or
    /// failure. The session becomes idle again only after it returns.
    /// In-flight jobs cannot be cancelled.
    ///
    /// # Errors
    ///
    /// [`SessionError::Spawn`] if the worker thread cannot be created; the
    /// session is left idle.
    pub fn submit<F>(&self, intensity: impl Into<Intensity>, deliver: F) -> Result<Submission, SessionError>
    where
        F: FnOnce(EngineResult<PixelBuffer>) + Send + 'static,
    {
        let intensity = intensity.into();
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(intensity = intensity.value(), "grade request dropped, worker busy");
            return Ok(Submission::Dropped);
        }

        let gate = BusyGuard(Arc::clone(&self.busy));
        let source = Arc::clone(&self.source);
        let cube = Arc::clone(&self.cube);
        let options = self.options;

        // On spawn failure the closure, and with it the guard, is dropped.
        let handle = thread::Builder::new()
            .name("hald-grade".into())
            .spawn(move || {
                let _gate = gate;
                let start = Instant::now();
                let result = transform_cube(source.view(), cube.as_ref(), intensity, &options);
                trace!(
                    intensity = intensity.value(),
                    ok = result.is_ok(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "grade job finished"
                );
                deliver(result);
            })?;

        trace!(intensity = intensity.value(), "grade job started");
        Ok(Submission::Started(GradeJob { handle }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use hald_lut::{CubeLookup, Interpolation};
    use std::sync::mpsc;

    fn session() -> GradeSession {
        GradeSession::new(PixelBuffer::filled(4, 4, [128, 64, 32, 255]), LutCube::identity())
    }

    #[test]
    fn test_starts_idle() {
        let s = session();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.source().pixel(0, 0), [128, 64, 32, 255]);
    }

    #[test]
    fn test_drops_while_busy() {
        let s = session();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (result_tx, result_rx) = mpsc::channel();

        let first = s
            .submit(1.0, move |res| {
                release_rx.recv().ok();
                result_tx.send(res.is_ok()).ok();
            })
            .unwrap();
        assert!(s.is_busy());

        let second = s.submit(0.5, |_| panic!("dropped request must not run")).unwrap();
        assert!(matches!(second, Submission::Dropped));

        release_tx.send(()).unwrap();
        let Submission::Started(job) = first else {
            panic!("first request should start");
        };
        job.wait().unwrap();
        assert!(result_rx.recv().unwrap());
        assert_eq!(s.state(), SessionState::Idle);

        let third = s.submit(0.2, |_| {}).unwrap();
        assert!(third.is_started());
        if let Submission::Started(job) = third {
            job.wait().unwrap();
        }
    }

    #[test]
    fn test_panicking_delivery_releases_gate() {
        let s = session();
        let Submission::Started(job) = s.submit(1.0, |_| panic!("delivery failed")).unwrap() else {
            panic!("request should start");
        };
        assert!(job.wait().is_err());
        assert!(!s.is_busy());
    }

    #[test]
    fn test_failed_transform_releases_gate() {
        let s = GradeSession::new(PixelBuffer::new(0, 0), LutCube::identity());
        let (tx, rx) = mpsc::channel();
        let Submission::Started(job) = s.submit(1.0, move |res| { tx.send(res).ok(); }).unwrap() else {
            panic!("request should start");
        };
        job.wait().unwrap();

        let err = rx.recv().unwrap().unwrap_err();
        assert!(matches!(err, EngineError::InvalidImage(_)));
        assert!(!s.is_busy());
    }

    #[test]
    fn test_options_apply_to_jobs() {
        let cube = LutCube::from_fn(|r, _, _| [r * 4, 0, 0]);
        let s = GradeSession::new(PixelBuffer::filled(2, 2, [130, 0, 0, 255]), cube)
            .with_options(GradeOptions::default().with_interpolation(Interpolation::Floor).with_parallel(false));
        assert_eq!(s.cube().lookup(32, 0, 0), [128, 0, 0]);

        let (tx, rx) = mpsc::channel();
        if let Submission::Started(job) = s.submit(1.0, move |res| { tx.send(res).ok(); }).unwrap() {
            job.wait().unwrap();
        }
        let out = rx.recv().unwrap().unwrap();
        // Floor ignores the 0.5 step toward 132
        assert_eq!(out.pixel(1, 1), [128, 0, 0, 255]);
    }

    #[test]
    fn test_from_strip_rejects_malformed() {
        let lut = PixelBuffer::new(64, 64);
        let err = GradeSession::from_strip(PixelBuffer::new(1, 1), lut.view()).unwrap_err();
        assert!(err.is_asset_error());
    }
}
