//! Lifecycle management for the install subprocess (Unix only)
//!
//! `go get` keeps downloading after its parent dies unless someone tells it
//! to stop. The install child is spawned into its own process group and
//! tracked here; dropping the [`ProcessGuard`] or receiving SIGTERM, SIGHUP
//! or SIGINT signals the whole group.

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

static CHILD_REGISTRY: OnceLock<Arc<Mutex<ChildRegistry>>> = OnceLock::new();

/// Process-group leaders spawned by this process that have not been reaped yet
#[derive(Debug, Default)]
pub struct ChildRegistry {
    pids: HashSet<u32>,
    cleanup_initiated: bool,
}

impl ChildRegistry {
    pub fn global() -> Arc<Mutex<ChildRegistry>> {
        CHILD_REGISTRY
            .get_or_init(|| Arc::new(Mutex::new(ChildRegistry::default())))
            .clone()
    }

    pub fn register(&mut self, pid: u32) {
        self.pids.insert(pid);
        debug!("Registered install process group {}", pid);
    }

    pub fn unregister(&mut self, pid: u32) {
        self.pids.remove(&pid);
        debug!("Unregistered install process group {}", pid);
    }

    pub fn count(&self) -> usize {
        self.pids.len()
    }

    /// SIGTERM every tracked group, then SIGKILL whatever outlives `grace_period`.
    ///
    /// Runs at most once per registry.
    pub fn terminate_all(&mut self, grace_period: Duration) {
        if self.cleanup_initiated {
            return;
        }
        self.cleanup_initiated = true;
        if self.pids.is_empty() {
            return;
        }

        info!("Terminating {} install process(es)", self.pids.len());
        let pids: Vec<u32> = self.pids.drain().collect();
        for &pid in &pids {
            signal_group_or_process(pid, Signal::SIGTERM);
        }

        let start = Instant::now();
        while start.elapsed() < grace_period {
            if !pids.iter().any(|&pid| is_process_alive(pid)) {
                debug!("All install processes exited after SIGTERM");
                return;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        for &pid in pids.iter().filter(|&&pid| is_process_alive(pid)) {
            warn!("Process group {} ignored SIGTERM, sending SIGKILL", pid);
            signal_group_or_process(pid, Signal::SIGKILL);
        }
    }
}

fn signal_group_or_process(pid: u32, sig: Signal) {
    // Negative pid addresses the whole group, so `go`'s own children go too.
    if let Err(e) = signal::kill(Pid::from_raw(-(pid as i32)), sig) {
        debug!("Group signal {} to {} failed ({}), signalling pid", sig, pid, e);
        if let Err(e) = signal::kill(Pid::from_raw(pid as i32), sig) {
            warn!("Failed to send {} to {}: {}", sig, pid, e);
        }
    }
}

/// Alive means signalable and not a zombie.
fn is_process_alive(pid: u32) -> bool {
    if signal::kill(Pid::from_raw(pid as i32), None).is_err() {
        return false;
    }
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .map(|state| !matches!(state, "Z" | "X"))
            .unwrap_or(true),
        Err(_) => true,
    }
}

/// Terminates every registered install process when dropped
pub struct ProcessGuard {
    registry: Arc<Mutex<ChildRegistry>>,
}

impl ProcessGuard {
    pub fn new() -> Self {
        Self {
            registry: ChildRegistry::global(),
        }
    }
}

impl Default for ProcessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.registry.lock() {
            registry.terminate_all(Duration::from_secs(3));
        }
    }
}

/// Install handlers for SIGINT, SIGTERM and SIGHUP.
///
/// `on_signal` runs first (the binary restores the terminal there), then
/// tracked children are terminated and the process exits with 128 + signal.
pub fn init_signal_handlers(on_signal: fn()) -> std::io::Result<()> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            info!("Received signal {}, shutting down", sig);
            on_signal();
            if let Ok(mut registry) = ChildRegistry::global().lock() {
                registry.terminate_all(Duration::from_secs(2));
            }
            std::process::exit(128 + sig);
        }
    });
    Ok(())
}

/// Extension trait placing a command's child in a fresh process group
pub trait CommandProcessGroup {
    fn in_new_process_group(&mut self) -> &mut Self;
}

impl CommandProcessGroup for std::process::Command {
    fn in_new_process_group(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        self.process_group(0);

        #[cfg(target_os = "linux")]
        // SAFETY: prctl is async-signal-safe and touches no parent state.
        unsafe {
            self.pre_exec(|| {
                if nix::libc::prctl(nix::libc::PR_SET_PDEATHSIG, nix::libc::SIGTERM) == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
        self
    }
}
