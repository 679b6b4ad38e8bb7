//! Keeps the kiosk display awake.
//!
//! The lock is an optional capability: when the host offers none, every
//! call is a no-op and nothing reaches the screen. Acquisition failures are
//! only logged.

use std::env;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum WakeLockError {
    #[error("failed to start idle inhibitor: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("wake lock refused: {0}")]
    Refused(String),
}

/// A host mechanism that can hold the screen on.
pub trait ScreenWakeLock {
    fn request(&mut self) -> Result<(), WakeLockError>;
    fn release(&mut self);
    /// `false` once released or revoked by the host.
    fn is_held(&mut self) -> bool;
}

/// Idle inhibitor backed by a `systemd-inhibit` child process.
pub struct InhibitorLock {
    program: PathBuf,
    child: Option<Child>,
}

impl InhibitorLock {
    pub const PROGRAM: &'static str = "systemd-inhibit";

    /// Locate the inhibitor on `PATH`.
    pub fn detect() -> Option<Self> {
        let paths = env::var_os("PATH")?;
        env::split_paths(&paths)
            .map(|dir| dir.join(Self::PROGRAM))
            .find(|candidate| candidate.is_file())
            .map(|program| Self {
                program,
                child: None,
            })
    }
}

impl ScreenWakeLock for InhibitorLock {
    fn request(&mut self) -> Result<(), WakeLockError> {
        if self.is_held() {
            return Ok(());
        }

        let child = Command::new(&self.program)
            .args([
                "--what=idle:sleep",
                "--who=punchkiosk",
                "--why=Time clock kiosk display",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_held(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                _ => {
                    self.child = None;
                    false
                }
            },
            None => false,
        }
    }
}

impl Drop for InhibitorLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// Acquire on mount, re-acquire on visibility, release on teardown.
pub struct WakeLockManager {
    lock: Option<Box<dyn ScreenWakeLock>>,
    visible: bool,
}

impl WakeLockManager {
    /// Use the host inhibitor if one exists, otherwise run without a lock.
    pub fn detect() -> Self {
        match InhibitorLock::detect() {
            Some(lock) => Self::with_lock(Box::new(lock)),
            None => {
                debug!("no wake lock available on this host");
                Self::unsupported()
            }
        }
    }

    pub fn unsupported() -> Self {
        Self {
            lock: None,
            visible: true,
        }
    }

    pub fn with_lock(lock: Box<dyn ScreenWakeLock>) -> Self {
        Self {
            lock: Some(lock),
            visible: true,
        }
    }

    pub fn is_held(&mut self) -> bool {
        self.lock.as_mut().is_some_and(|l| l.is_held())
    }

    pub fn on_mount(&mut self) {
        self.visible = true;
        self.acquire();
    }

    /// Hosts revoke the lock while hidden; take it back once visible again.
    pub fn on_visibility_change(&mut self, visible: bool) {
        self.visible = visible;
        if visible && !self.is_held() {
            self.acquire();
        }
    }

    pub fn on_teardown(&mut self) {
        if let Some(lock) = self.lock.as_mut() {
            lock.release();
            debug!("wake lock released");
        }
    }

    fn acquire(&mut self) {
        let Some(lock) = self.lock.as_mut() else {
            return;
        };
        match lock.request() {
            Ok(()) => info!("wake lock acquired"),
            Err(e) => debug!(error = %e, "wake lock not acquired"),
        }
    }
}
