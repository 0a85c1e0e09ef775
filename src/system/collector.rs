use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{Disks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform::{PlatformTicks, ProcessClock, TickReader};
use super::source::{CpuTicks, FileStore, MemoryTotals, PlatformSource, ProcessSample};

pub struct SysinfoSource {
    sys: System,
    ticks: PlatformTicks,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        SysinfoSource {
            sys,
            ticks: PlatformTicks::default(),
        }
    }
}

impl PlatformSource for SysinfoSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks> {
        self.ticks.read_ticks(&mut self.sys)
    }

    fn memory_totals(&mut self) -> Result<MemoryTotals> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(eyre!("platform reported no physical memory"));
        }
        Ok(MemoryTotals {
            total,
            available: self.sys.available_memory(),
        })
    }

    fn file_stores(&mut self) -> Result<Vec<FileStore>> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .list()
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                FileStore {
                    name: disk.name().to_string_lossy().into_owned(),
                    mount: disk.mount_point().display().to_string(),
                    // Pseudo filesystems report zero capacity.
                    total_bytes: (total > 0).then_some(total),
                    usable_bytes: disk.available_space(),
                }
            })
            .collect())
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );

        let clock = ProcessClock::capture();
        Ok(self
            .sys
            .processes()
            .iter()
            // Linux lists every thread as a task of its own.
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| ProcessSample {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                cumulative_cpu_ms: process.accumulated_cpu_time(),
                run_time_ms: clock.run_time_ms(pid.as_u32(), process.run_time()),
                resident_bytes: process.memory(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_current_host() {
        let mut source = SysinfoSource::new();
        let memory = source.memory_totals().unwrap();
        assert!(memory.total > 0);

        let pid = std::process::id();
        let processes = source.processes().unwrap();
        assert!(processes.iter().any(|p| p.pid == pid));
        let mut pids: Vec<u32> = processes.iter().map(|p| p.pid).collect();
        pids.sort_unstable();
        pids.dedup();
        assert_eq!(pids.len(), processes.len());

        for store in source.file_stores().unwrap() {
            assert!(store.total_bytes != Some(0));
        }
    }
}
