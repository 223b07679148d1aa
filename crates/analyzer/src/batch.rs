use std::{path::PathBuf, thread};

use crossbeam::channel::{self, Receiver};
use log::debug;

use crate::{analyzer::FileAnalyzer, record::FileRecord};

/// Analyze `paths` and return one record per path, in input order.
///
/// With `jobs > 1` files are spread over scoped worker threads; each file is
/// still handled start to finish by a single worker.
pub fn run_batch(analyzer: &FileAnalyzer, paths: &[PathBuf], jobs: usize) -> Vec<FileRecord> {
    let jobs = jobs.clamp(1, paths.len().max(1));
    if jobs == 1 {
        return paths.iter().map(|p| analyzer.analyze(p)).collect();
    }

    debug!("[batch] analyzing {} files on {} workers", paths.len(), jobs);

    let work_rx = queue_paths(paths);
    let (done_tx, done_rx) = channel::unbounded::<(usize, FileRecord)>();

    thread::scope(|s| {
        for _ in 0..jobs {
            let work_rx = work_rx.clone();
            let done_tx = done_tx.clone();

            s.spawn(move || {
                for (idx, path) in work_rx {
                    if done_tx.send((idx, analyzer.analyze(path))).is_err() {
                        return;
                    }
                }
            });
        }
    });
    drop(done_tx);

    let mut slots: Vec<Option<FileRecord>> = Vec::new();
    slots.resize_with(paths.len(), || None);
    for (idx, record) in done_rx {
        slots[idx] = Some(record);
    }

    slots.into_iter().flatten().collect()
}

/// A closed work queue holding every path with its input index.
fn queue_paths(paths: &[PathBuf]) -> Receiver<(usize, &PathBuf)> {
    let (work_tx, work_rx) = channel::unbounded();
    for item in paths.iter().enumerate() {
        work_tx
            .send(item)
            .expect("unbounded channel with a live receiver accepts every send");
    }
    work_rx
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
