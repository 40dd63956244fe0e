//! Clip execution: applying one pipeline to an ordered frame sequence.
//!
//! Frames are independent, so a clip fans out over a small worker pool.
//! Results come back keyed by frame index and are reassembled into the
//! original order, which makes the output indistinguishable from a
//! sequential run. The first failing frame stops the feed; frames already
//! in flight finish but their results are discarded.

use crossbeam_channel::{bounded, unbounded};
use tracing::debug;

use crate::error::{FrameError, GeometryError};
use crate::frame::Frame;
use crate::pipeline::Pipeline;

/// Applies `pipeline` to every frame of a clip, preserving order.
///
/// `workers` caps the number of processing threads. Zero or one worker
/// runs inline on the calling thread, and anything above the frame count
/// is clamped down to it.
pub fn process_clip(
    pipeline: &Pipeline,
    frames: Vec<Frame>,
    workers: usize,
) -> Result<Vec<Frame>, FrameError> {
    let total = frames.len();
    if workers <= 1 || total <= 1 {
        return process_inline(pipeline, frames);
    }
    let workers = workers.min(total);
    debug!(workers, frames = total, "processing clip on worker pool");

    std::thread::scope(|scope| {
        let (job_tx, job_rx) = bounded::<(usize, Frame)>(workers);
        let (result_tx, result_rx) = unbounded::<(usize, Result<Frame, GeometryError>)>();

        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, frame) in job_rx {
                    let result = pipeline.apply(frame);
                    if result_tx.send((index, result)).is_err() {
                        // Collector is gone; stop pulling jobs.
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(result_tx);

        // Feed from a separate thread so collection can run concurrently.
        scope.spawn(move || {
            for job in frames.into_iter().enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        let mut done: Vec<(usize, Frame)> = Vec::with_capacity(total);
        while done.len() < total {
            match result_rx.recv() {
                Ok((index, Ok(frame))) => done.push((index, frame)),
                Ok((index, Err(source))) => {
                    // Returning drops the receiver, which fails every
                    // worker's next send and in turn unblocks the feeder.
                    return Err(FrameError { index, source });
                }
                Err(_) => break,
            }
        }

        done.sort_by_key(|&(index, _)| index);
        Ok(done.into_iter().map(|(_, frame)| frame).collect())
    })
}

fn process_inline(pipeline: &Pipeline, frames: Vec<Frame>) -> Result<Vec<Frame>, FrameError> {
    debug!(frames = frames.len(), "processing clip inline");
    frames
        .into_iter()
        .enumerate()
        .map(|(index, frame)| {
            pipeline
                .apply(frame)
                .map_err(|source| FrameError { index, source })
        })
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
