use std::cmp::Ordering;

use super::source::ProcessSample;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    /// Lifetime CPU time as a percentage of lifetime wall time. Can exceed 100
    /// for processes that keep several cores busy.
    pub cpu_load_pct: f64,
    pub resident_set_size: u64,
}

impl From<&ProcessSample> for ProcessInfo {
    fn from(sample: &ProcessSample) -> Self {
        ProcessInfo {
            pid: sample.pid,
            name: sample.name.clone(),
            cpu_load_pct: cumulative_load_pct(sample.cumulative_cpu_ms, sample.run_time_ms),
            resident_set_size: sample.resident_bytes,
        }
    }
}

pub fn cumulative_load_pct(cpu_ms: u64, run_ms: u64) -> f64 {
    if run_ms == 0 {
        return 0.0;
    }
    100.0 * cpu_ms as f64 / run_ms as f64
}

/// Heaviest `n` by load, ties broken by ascending pid.
pub fn compute_top_processes(processes: &[ProcessSample], n: usize) -> Vec<ProcessInfo> {
    let mut ranked: Vec<ProcessInfo> = processes.iter().map(ProcessInfo::from).collect();
    ranked.sort_by(rank_order);
    ranked.truncate(n);
    ranked
}

fn rank_order(a: &ProcessInfo, b: &ProcessInfo) -> Ordering {
    b.cpu_load_pct
        .total_cmp(&a.cpu_load_pct)
        .then_with(|| a.pid.cmp(&b.pid))
}
