use rand::prelude::*;

use super::job::ProcessSpec;
use crate::core::Ticks;

/// Bernoulli arrivals over `ticks`: each tick spawns a process with
/// probability `p_arrival`, short with probability `p_short`, long otherwise.
/// Identical arguments always produce the identical workload.
pub fn bernoulli(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_burst: Ticks,
    long_burst: Ticks,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_burst
            } else {
                long_burst
            };

            processes.push(ProcessSpec::new(format!("P{}", processes.len() + 1), t, burst));
        }
    }

    processes
}
