// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Ordered, exactly-once cleanup actions shared by all exit paths (normal, error, SIGINT)
// role: runtime/lifecycle
// inputs: Closures registered by components; SIGINT via ctrlc
// outputs: none (side-effectful closures)
// side_effects: Runs registered closures; interrupt handler exits the process
// invariants:
// - register appends; it never replaces earlier actions
// - run_all executes actions in registration order, each exactly once
// - a second run_all (e.g. signal then normal exit) is a no-op
// errors: closures are infallible by construction; failures inside them must be logged, not raised
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use once_cell::sync::Lazy;

type Action = Box<dyn FnOnce() + Send>;

static ACTIONS: Lazy<Mutex<Vec<Action>>> = Lazy::new(|| Mutex::new(Vec::new()));

fn actions() -> MutexGuard<'static, Vec<Action>> {
  // A poisoned registry still has to run its actions on the way down.
  ACTIONS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Append a cleanup action. The shell ancestor of this tool clobbered traps
/// when two callers registered for the same signal; here registrations
/// always accumulate.
pub fn register<F>(action: F)
where
  F: FnOnce() + Send + 'static,
{
  actions().push(Box::new(action));
}

/// Drain and run every registered action, oldest first. Safe to call from
/// more than one exit path: draining under the lock makes each action run
/// exactly once.
pub fn run_all() {
  let drained: Vec<Action> = {
    let mut guard = actions();
    std::mem::take(&mut *guard)
  };
  for action in drained {
    action();
  }
}

/// Route SIGINT through the registered actions before terminating, so an
/// interrupt mid-generator or mid-git still restores what we overrode.
pub fn install_interrupt_handler() -> Result<()> {
  ctrlc::set_handler(|| {
    run_all();
    std::process::exit(130);
  })?;
  Ok(())
}
