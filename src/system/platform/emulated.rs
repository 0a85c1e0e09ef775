use std::collections::BTreeMap;
use std::time::Instant;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::System;

use super::TickReader;
use crate::system::source::{CpuTicks, TickCounters};

/// Builds tick counters from `sysinfo`'s usage percentages on platforms that
/// do not expose raw counters.
///
/// Each reading adds the elapsed wall time, in microseconds, to the counters:
/// the busy share to `user` and the rest to `idle`. Deltas between two
/// readings then reproduce the usage `sysinfo` measured for that interval.
#[derive(Debug, Default)]
pub struct PlatformTicks {
    last: Option<Instant>,
    system: TickCounters,
    cores: BTreeMap<u32, TickCounters>,
}

impl TickReader for PlatformTicks {
    fn read_ticks(&mut self, sys: &mut System) -> Result<CpuTicks> {
        sys.refresh_cpu_usage();
        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(eyre!("platform reported no CPUs"));
        }

        let now = Instant::now();
        let elapsed_us = self
            .last
            .map_or(0, |last| now.duration_since(last).as_micros() as u64);
        self.last = Some(now);

        let mut cores = BTreeMap::new();
        for (id, cpu) in (0u32..).zip(cpus) {
            let mut counters = self.cores.get(&id).copied().unwrap_or_default();
            accumulate(&mut counters, cpu.cpu_usage(), elapsed_us);
            cores.insert(id, counters);
        }
        self.cores = cores;
        accumulate(&mut self.system, sys.global_cpu_usage(), elapsed_us);

        Ok(CpuTicks {
            system: self.system,
            cores: self.cores.clone(),
        })
    }
}

/// `sysinfo` only reports whole seconds of run time on these platforms.
#[derive(Debug, Default)]
pub struct ProcessClock;

impl ProcessClock {
    pub fn capture() -> Self {
        ProcessClock
    }

    pub fn run_time_ms(&self, _pid: u32, coarse_secs: u64) -> u64 {
        coarse_secs.saturating_mul(1000)
    }
}

fn accumulate(counters: &mut TickCounters, usage_pct: f32, elapsed_us: u64) {
    let share = (f64::from(usage_pct) / 100.0).clamp(0.0, 1.0);
    let busy = (elapsed_us as f64 * share).round() as u64;
    counters.user = counters.user.saturating_add(busy);
    counters.idle = counters.idle.saturating_add(elapsed_us - busy);
}
