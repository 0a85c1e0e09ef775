//! The boundary between the sampler and whatever reads the host's counters.

use std::collections::BTreeMap;

use color_eyre::Result;

/// Cumulative time per CPU state since boot. Only deltas carry meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickCounters {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl TickCounters {
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
            .saturating_add(self.iowait)
            .saturating_add(self.irq)
            .saturating_add(self.softirq)
            .saturating_add(self.steal)
    }

    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    /// Per-state difference `self - earlier`. A state whose counter went
    /// backwards (reset or wrap) contributes zero.
    pub fn since(&self, earlier: &TickCounters) -> TickCounters {
        TickCounters {
            user: self.user.saturating_sub(earlier.user),
            nice: self.nice.saturating_sub(earlier.nice),
            system: self.system.saturating_sub(earlier.system),
            idle: self.idle.saturating_sub(earlier.idle),
            iowait: self.iowait.saturating_sub(earlier.iowait),
            irq: self.irq.saturating_sub(earlier.irq),
            softirq: self.softirq.saturating_sub(earlier.softirq),
            steal: self.steal.saturating_sub(earlier.steal),
        }
    }
}

/// One reading of the aggregate counters and every online core's counters,
/// keyed by the kernel's CPU id. Offline cores are absent, so ids can skip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub system: TickCounters,
    pub cores: BTreeMap<u32, TickCounters>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryTotals {
    pub total: u64,
    pub available: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    pub name: String,
    pub mount: String,
    pub total_bytes: Option<u64>,
    pub usable_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cumulative_cpu_ms: u64,
    pub run_time_ms: u64,
    pub resident_bytes: u64,
}

pub trait PlatformSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks>;
    fn memory_totals(&mut self) -> Result<MemoryTotals>;
    fn file_stores(&mut self) -> Result<Vec<FileStore>>;
    /// Processes only; a platform that lists threads as tasks filters them out.
    fn processes(&mut self) -> Result<Vec<ProcessSample>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(user: u64, system: u64, idle: u64, iowait: u64) -> TickCounters {
        TickCounters {
            user,
            system,
            idle,
            iowait,
            ..TickCounters::default()
        }
    }

    #[test]
    fn idle_total_includes_iowait() {
        let t = ticks(10, 5, 80, 5);
        assert_eq!(t.total(), 100);
        assert_eq!(t.idle_total(), 85);
    }

    #[test]
    fn since_clamps_counters_that_went_backwards() {
        let earlier = ticks(100, 50, 1000, 40);
        let later = ticks(150, 60, 1100, 10);
        let delta = later.since(&earlier);
        assert_eq!(delta.user, 50);
        assert_eq!(delta.system, 10);
        assert_eq!(delta.idle, 100);
        assert_eq!(delta.iowait, 0);
    }
}
