//! Watch mode: debounced regeneration on drop-folder changes.
//!
//! Subscribes to filesystem notifications for the source directory and
//! schedules one full regeneration pass after a quiescent period. The loop
//! is a single-slot debounced task queue:
//!
//! - any change to a file with a supported extension marks a run as pending;
//! - every further event restarts the debounce window;
//! - only quiescence triggers the run, and the run executes inline on this
//!   thread, so a second run can never start while one is in flight.
//!
//! A failed run (for example the source directory disappearing mid-watch)
//! is reported and the loop keeps waiting; cancellation only ever prevents
//! the next run, it never interrupts one that already started.

use crate::config::GenConfig;
use crate::generate::{self, GenerateError};
use crate::output;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::time::Duration;
use thiserror::Error;

/// Quiescence window after the last relevant change event. Fixed, not
/// configurable per call.
pub const DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("watcher error: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Run an initial pass, then regenerate on every quiescent batch of changes.
///
/// Blocks the calling thread until the notification channel disconnects.
pub fn watch(config: &GenConfig) -> Result<(), WatchError> {
    let report = generate::run(config)?;
    output::print_run_output(&report);
    println!("Watching {} for changes", config.source.display());

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())?;
    let mode = if config.recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher.watch(&config.source, mode)?;

    let mut pending = false;
    loop {
        match rx.recv_timeout(DEBOUNCE) {
            Ok(Ok(event)) => {
                if paths_are_relevant(&event.paths) {
                    pending = true;
                }
            }
            Ok(Err(e)) => eprintln!("watch event error: {e}"),
            Err(RecvTimeoutError::Timeout) => {
                if pending {
                    pending = false;
                    match generate::run(config) {
                        Ok(report) => output::print_run_output(&report),
                        Err(e) => eprintln!("regeneration failed: {e}"),
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Whether any changed path carries a supported extension.
///
/// Changes to unsupported files (editor swap files, the generated output if
/// it happens to live inside the watched tree) never schedule a run.
fn paths_are_relevant(paths: &[PathBuf]) -> bool {
    paths.iter().any(|p| is_relevant(p))
}

fn is_relevant(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy())
        .is_some_and(|ext| crate::filetype::resolve(&ext).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_schedule_a_run() {
        assert!(is_relevant(Path::new("programs/Chapt1Exercise1.m")));
        assert!(is_relevant(Path::new("programs/Chapt1Exercise1.PDF")));
        assert!(is_relevant(Path::new("deep/nested/fermi.txt")));
    }

    #[test]
    fn unsupported_paths_are_ignored() {
        assert!(!is_relevant(Path::new("programs/notes.docx")));
        assert!(!is_relevant(Path::new("programs/.Chapt1Exercise1.m.swp")));
        assert!(!is_relevant(Path::new("programs/no_extension")));
    }

    #[test]
    fn any_relevant_path_in_a_batch_counts() {
        let paths = vec![
            PathBuf::from("a.docx"),
            PathBuf::from("b.tmp"),
            PathBuf::from("Chapt2Fig1.tex"),
        ];
        assert!(paths_are_relevant(&paths));
        assert!(!paths_are_relevant(&paths[..2]));
        assert!(!paths_are_relevant(&[]));
    }
}
