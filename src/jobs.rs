//! Simulated encode jobs
//!
//! Stand-ins for the interpolation/encoding workers that feed the pipeline.
//! Each job runs as a tokio task and writes per-frame detail to its own hidden
//! channel; a single aggregate progress line is kept at the bottom of the
//! display through replace-last-line updates.

use crate::config::DemoConfig;
use crate::logging::{LogEntry, LogHandle};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::warn;

/// Summary returned once every job finished
#[derive(Debug, Clone, Copy)]
pub struct JobsSummary {
    pub jobs: usize,
    pub frames: u64,
    pub elapsed: Duration,
}

/// Channel a job writes its frame details to
pub fn job_channel(index: usize) -> String {
    format!("job-{}", index + 1)
}

/// Aggregate progress line, e.g. `Processing frame 5/8 (job-1 3/4, job-2 2/4)`
pub fn progress_line(done: &[u32], frames_per_job: u32) -> String {
    let total_done: u64 = done.iter().map(|&d| u64::from(d)).sum();
    let total = done.len() as u64 * u64::from(frames_per_job);
    let per_job = done
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{} {}/{}", job_channel(i), d, frames_per_job))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Processing frame {}/{} ({})", total_done, total, per_job)
}

/// Run `cfg.jobs` concurrent jobs to completion
pub async fn run_jobs(log: LogHandle, cfg: &DemoConfig) -> JobsSummary {
    let started = Instant::now();
    let frames = cfg.frames;
    let interval = Duration::from_millis(cfg.frame_interval_ms);
    let progress: Arc<Vec<AtomicU32>> =
        Arc::new((0..cfg.jobs).map(|_| AtomicU32::new(0)).collect());

    log.log(format!("Starting {} encode jobs ({} frames each)", cfg.jobs, frames));
    log.log(progress_line(&snapshot(&progress), frames));

    let mut set = JoinSet::new();
    for index in 0..cfg.jobs {
        let log = log.clone();
        let progress = progress.clone();
        set.spawn(async move {
            let channel = job_channel(index);
            log.log_entry(LogEntry::new("Job started").hidden().to_channel(&channel));

            for frame in 1..=frames {
                tokio::time::sleep(interval).await;
                log.log_entry(
                    LogEntry::new(format!("Interpolated frame {}/{}", frame, frames))
                        .hidden()
                        .to_channel(&channel),
                );
                progress[index].store(frame, Ordering::Relaxed);
                log.log_entry(
                    LogEntry::new(progress_line(&snapshot(&progress), frames)).replacing(),
                );
            }

            log.log_entry(LogEntry::new("Job finished").hidden().to_channel(&channel));
        });
    }

    while let Some(joined) = set.join_next().await {
        if let Err(e) = joined {
            warn!("Encode job failed: {}", e);
        }
    }

    // Jobs race between storing progress and enqueueing, so settle the line.
    log.log_entry(LogEntry::new(progress_line(&snapshot(&progress), frames)).replacing());

    let summary = JobsSummary {
        jobs: cfg.jobs,
        frames: cfg.jobs as u64 * u64::from(frames),
        elapsed: started.elapsed(),
    };
    log.log(format!(
        "All jobs finished: {} frames in {:.1}s",
        summary.frames,
        summary.elapsed.as_secs_f64()
    ));
    summary
}

fn snapshot(progress: &[AtomicU32]) -> Vec<u32> {
    progress.iter().map(|p| p.load(Ordering::Relaxed)).collect()
}
