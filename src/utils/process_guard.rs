//! Process lifecycle guard for the wrapped command.
//!
//! `crashcue run` must not leave the wrapped command behind:
//! - SIGINT (Ctrl+C) via ctrlc handler
//! - SIGHUP (terminal hangup) via signal_hook
//! - Parent process death (terminal force-closed, reparented to init/subreaper)
//!
//! Orphan detection compares the parent PID against a snapshot instead of
//! checking for PID 1, so systemd subreapers and launchd both count.

use std::io;
use std::process::{Child, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a guarded child finished.
#[derive(Debug, Clone, Copy)]
pub struct GuardedExit {
    pub status: ExitStatus,
    /// True when the guard killed the child (signal or orphaned)
    pub interrupted: bool,
}

/// Guards a child process against outliving `crashcue run`.
///
/// Create before spawning, register signals, then use `wait` instead of
/// `.status()`.
pub struct ProcessGuard {
    interrupted: Arc<AtomicBool>,
    #[cfg(unix)]
    initial_ppid: u32,
}

impl Default for ProcessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGuard {
    /// Snapshot the current parent PID for later orphan detection.
    pub fn new() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            #[cfg(unix)]
            initial_ppid: unsafe { libc::getppid() as u32 },
        }
    }

    /// Register SIGINT and SIGHUP handlers setting the interrupted flag.
    ///
    /// A second registration in the same process is ignored.
    pub fn register_signal_handlers(&self) {
        let flag = self.interrupted.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .ok();

        #[cfg(unix)]
        {
            use signal_hook::flag::register;
            let _ = register(libc::SIGHUP, self.interrupted.clone());
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Wait for `child`, killing it on signal or orphan detection.
    pub fn wait(&self, child: &mut Child) -> io::Result<GuardedExit> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(GuardedExit {
                    status,
                    interrupted: self.is_interrupted(),
                });
            }
            if self.should_terminate() {
                let _ = child.kill();
                let status = child.wait()?;
                return Ok(GuardedExit {
                    status,
                    interrupted: true,
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn should_terminate(&self) -> bool {
        self.is_interrupted() || self.is_orphaned()
    }

    #[cfg(unix)]
    fn is_orphaned(&self) -> bool {
        let current_ppid = unsafe { libc::getppid() as u32 };
        current_ppid != self.initial_ppid
    }

    #[cfg(not(unix))]
    fn is_orphaned(&self) -> bool {
        false
    }
}
