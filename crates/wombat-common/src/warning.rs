//! Deduplicated stderr warnings.
//!
//! The selector engine reports features that parse but are never evaluated
//! (unsupported pseudo-classes, for instance). Matching runs once per
//! candidate node, so each unique message is printed a single time.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

static SEEN: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Prints a warning the first time a component/message pair is seen.
/// Repeats of the same pair are dropped silently.
pub fn warn_once(component: &str, message: &str) {
    let Ok(mut seen) = SEEN.lock() else {
        return;
    };
    if seen.insert(format!("{component}: {message}")) {
        eprintln!("{YELLOW}[wombat {component}] {message}{RESET}");
    }
}
