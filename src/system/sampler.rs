//! Turns pairs of raw counter readings into the rates the dashboard shows.

use std::collections::BTreeMap;

use chrono::Local;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::debug;

use super::process::{DEFAULT_TOP_N, compute_top_processes};
use super::snapshot::{DiskUsage, ResourceSnapshot};
use super::source::{CpuTicks, FileStore, PlatformSource, TickCounters};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuUsage {
    pub average_pct: f64,
    pub per_core_pct: Vec<f64>,
}

pub fn busy_pct(prev: &TickCounters, curr: &TickCounters) -> f64 {
    let delta = curr.since(prev);
    let total = delta.total();
    if total == 0 {
        return 0.0;
    }
    let active = total.saturating_sub(delta.idle_total());
    (100.0 * active as f64 / total as f64).clamp(0.0, 100.0)
}

/// Aggregate and per-core busy percentages over one interval.
///
/// Cores are paired by id, in ascending id order. A core without a previous
/// reading (it came online mid-run) reports 0.
pub fn compute_cpu(
    prev_system: &TickCounters,
    curr_system: &TickCounters,
    prev_cores: &BTreeMap<u32, TickCounters>,
    curr_cores: &BTreeMap<u32, TickCounters>,
) -> CpuUsage {
    let per_core_pct = curr_cores
        .iter()
        .map(|(id, curr)| prev_cores.get(id).map_or(0.0, |prev| busy_pct(prev, curr)))
        .collect();

    CpuUsage {
        average_pct: busy_pct(prev_system, curr_system),
        per_core_pct,
    }
}

pub fn compute_memory(total: u64, available: u64) -> u64 {
    if available > total {
        debug!(total, available, "available memory exceeds total, clamping used to 0");
    }
    total.saturating_sub(available)
}

pub fn compute_disks(stores: &[FileStore]) -> Vec<DiskUsage> {
    stores
        .iter()
        .filter_map(|store| {
            let Some(total) = store.total_bytes else {
                debug!(name = %store.name, mount = %store.mount, "skipping store without a size");
                return None;
            };
            if store.usable_bytes > total {
                debug!(
                    name = %store.name,
                    total,
                    usable = store.usable_bytes,
                    "usable space exceeds total, clamping used to 0"
                );
            }
            Some(DiskUsage {
                name: store.name.clone(),
                mount: store.mount.clone(),
                total_bytes: total,
                used_bytes: total.saturating_sub(store.usable_bytes),
            })
        })
        .collect()
}

pub struct Sampler<S> {
    source: S,
    previous: CpuTicks,
    top_n: usize,
}

impl<S: PlatformSource> Sampler<S> {
    pub fn new(mut source: S) -> Result<Self> {
        let previous = source
            .cpu_ticks()
            .wrap_err("failed to take the baseline CPU reading")?;
        debug!(cores = previous.cores.len(), "sampler baseline taken");
        Ok(Sampler {
            source,
            previous,
            top_n: DEFAULT_TOP_N,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The CPU baseline moves forward as soon as the new tick counters are in
    /// hand, even if a later read fails.
    pub fn sample(&mut self) -> Result<ResourceSnapshot> {
        let current = self
            .source
            .cpu_ticks()
            .wrap_err("failed to read CPU counters")?;
        let previous = std::mem::replace(&mut self.previous, current);
        let cpu = compute_cpu(
            &previous.system,
            &self.previous.system,
            &previous.cores,
            &self.previous.cores,
        );

        let memory = self
            .source
            .memory_totals()
            .wrap_err("failed to read memory totals")?;
        let stores = self
            .source
            .file_stores()
            .wrap_err("failed to list filesystems")?;
        let processes = self
            .source
            .processes()
            .wrap_err("failed to list processes")?;

        Ok(ResourceSnapshot {
            cpu_average_pct: cpu.average_pct,
            per_core_pct: cpu.per_core_pct,
            total_memory_bytes: memory.total,
            used_memory_bytes: compute_memory(memory.total, memory.available),
            disks: compute_disks(&stores),
            top_processes: compute_top_processes(&processes, self.top_n),
            timestamp: Local::now().naive_local(),
        })
    }
}
