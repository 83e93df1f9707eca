// src/progress.rs

//! Defines a trait for reporting progress of the resolution steps.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// A trait for reporting progress, abstracting over specific implementations like `indicatif`.
///
/// The resolver calls `set_length` once with the number of requests it will
/// make, then `set_message`/`set_position` around each request.
///
/// # Examples
///
/// ```
/// use geosite_files::progress::ProgressReporter;
/// use std::sync::Mutex;
///
/// // A mock reporter that just stores the last message.
/// struct MockProgress {
///     last_message: Mutex<String>,
/// }
/// impl ProgressReporter for MockProgress {
///     fn set_length(&self, len: u64) {}
///     fn set_position(&self, pos: u64) {}
///     fn set_message(&self, msg: String) {
///         *self.last_message.lock().unwrap() = msg;
///     }
///     fn finish_with_message(&self, msg: String) {
///         *self.last_message.lock().unwrap() = msg;
///     }
///     fn abandon(&self) {}
/// }
///
/// let reporter = MockProgress { last_message: Mutex::new("".to_string()) };
/// reporter.set_message("Fetching branch...".to_string());
/// assert_eq!(*reporter.last_message.lock().unwrap(), "Fetching branch...");
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Sets the total number of steps.
    fn set_length(&self, len: u64);
    /// Sets the number of completed steps.
    fn set_position(&self, pos: u64);
    /// Describes the step currently running.
    fn set_message(&self, msg: String);
    /// Finishes with a final message; the completed bar stays on screen.
    fn finish_with_message(&self, msg: String);
    /// Stops after a failure and removes the bar so the error is printed on a clean line.
    fn abandon(&self);
}

/// An implementation of `ProgressReporter` using the `indicatif` crate.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    /// Creates a new step counter with a spinner.
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] step {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Self { bar: pb }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }

    fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}
