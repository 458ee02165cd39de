// credit: https://github.com/microsoft/Spartan/blob/master/src/timer.rs

#[cfg(feature = "profile")]
use colored::Colorize;
#[cfg(feature = "profile")]
use core::sync::atomic::AtomicUsize;
#[cfg(feature = "profile")]
use core::sync::atomic::Ordering;
#[cfg(feature = "profile")]
use std::time::Instant;

#[cfg(feature = "profile")]
pub static CALL_DEPTH: AtomicUsize = AtomicUsize::new(0);

/// Nested wall-clock timer for the build and proof phases.
///
/// Output goes through the `log` facade at info level so it never mixes
/// with JSON written to stdout.
#[cfg(feature = "profile")]
pub struct Timer {
    label: String,
    timer: Instant,
    is_root: bool,
}

#[cfg(feature = "profile")]
impl Timer {
    #[inline(always)]
    pub fn new(label: &str, is_root: bool) -> Self {
        if !is_root {
            Self {
                label: label.to_string(),
                timer: Instant::now(),
                is_root: false,
            }
        } else {
            let timer = Instant::now();
            let depth = CALL_DEPTH.fetch_add(1, Ordering::Relaxed) + 1;
            log::info!(
                "{:indent$}* {}",
                "",
                label.yellow().bold(),
                indent = 2 * depth
            );
            Self {
                label: label.to_string(),
                timer,
                is_root,
            }
        }
    }

    #[inline(always)]
    pub fn stop(&self) {
        if self.is_root {
            let duration = self.timer.elapsed();
            log::info!(
                "{:indent$}* {} {:?}",
                "",
                self.label.blue().bold(),
                duration,
                indent = 2 * CALL_DEPTH.load(Ordering::Relaxed)
            );
            CALL_DEPTH.fetch_sub(1, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub fn print(&self, msg: &str) {
        if self.is_root {
            log::info!(
                "{:indent$}* {}",
                "",
                msg.green().bold(),
                indent = 2 * (CALL_DEPTH.load(Ordering::Relaxed) + 1)
            );
        }
    }
}

#[cfg(not(feature = "profile"))]
pub struct Timer {}

#[cfg(not(feature = "profile"))]
impl Timer {
    #[inline(always)]
    pub fn new(_label: &str, _is_root: bool) -> Self {
        Self {}
    }

    #[inline(always)]
    pub fn stop(&self) {}

    #[inline(always)]
    pub fn print(&self, _msg: &str) {}
}
