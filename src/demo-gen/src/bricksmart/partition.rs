use std::ops::Range;
use std::thread;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::DemoGenError;
use crate::error::Result;

/// Receives the number of rows generated since the previous call.
pub type Progress = dyn Fn(usize) + Send + Sync;

const PROGRESS_STEP: usize = 10_000;

/// Splits ids `1..=count` into `partitions` contiguous ranges.
pub fn ranges(count: usize, partitions: usize) -> Vec<Range<i64>> {
    let partitions = partitions.clamp(1, count.max(1));
    let per = count / partitions;
    let rem = count % partitions;

    let mut start = 1;
    (0..partitions)
        .map(|idx| {
            let len = (per + usize::from(idx < rem)) as i64;
            let range = start..start + len;
            start += len;
            range
        })
        .filter(|r| !r.is_empty())
        .collect()
}

/// Generates `count` rows with `f(rng, id)` over scoped threads, one per partition.
///
/// Every partition gets its own random source seeded from `rng` in partition order, so the
/// output depends only on `rng` and the partition count. Rows come back in id order.
pub fn generate_partitioned<T, R, F>(
    rng: &mut R,
    count: usize,
    partitions: usize,
    progress: Option<&Progress>,
    f: F,
) -> Result<Vec<T>>
where
    T: Send,
    R: Rng,
    F: Fn(&mut StdRng, i64) -> Result<T> + Sync,
{
    let ranges = ranges(count, partitions);
    let seeds = ranges.iter().map(|_| rng.gen::<u64>()).collect::<Vec<_>>();
    debug!("generating {count} rows over {} partitions", ranges.len());

    let f = &f;
    let parts = thread::scope(|s| {
        let handles = ranges
            .into_iter()
            .zip(seeds)
            .map(|(range, seed)| {
                s.spawn(move || -> Result<Vec<T>> {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut out = Vec::with_capacity(range.clone().count());
                    let mut pending = 0;
                    for id in range {
                        out.push(f(&mut rng, id)?);
                        pending += 1;
                        if pending == PROGRESS_STEP {
                            if let Some(p) = progress {
                                p(pending);
                            }
                            pending = 0;
                        }
                    }
                    if let (Some(p), true) = (progress, pending > 0) {
                        p(pending);
                    }
                    Ok(out)
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| DemoGenError::Internal("generator thread panicked".to_string()))?
            })
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(parts.into_iter().flatten().collect())
}
