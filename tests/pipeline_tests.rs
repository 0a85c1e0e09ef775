use color_eyre::Result;
use hostwatch::system::sampler::Sampler;
use hostwatch::system::source::{
    CpuTicks, FileStore, MemoryTotals, PlatformSource, ProcessSample, TickCounters,
};
use hostwatch::ui::render;

const GIB: u64 = 1024 * 1024 * 1024;

/// A host whose counters advance by a fixed step on every read.
struct SteadyHost {
    reads: u64,
}

impl PlatformSource for SteadyHost {
    fn cpu_ticks(&mut self) -> Result<CpuTicks> {
        self.reads += 1;
        let busy = TickCounters {
            user: self.reads * 80,
            idle: self.reads * 20,
            ..TickCounters::default()
        };
        let quiet = TickCounters {
            user: self.reads * 5,
            idle: self.reads * 95,
            ..TickCounters::default()
        };
        Ok(CpuTicks {
            system: TickCounters {
                user: busy.user + quiet.user,
                idle: busy.idle + quiet.idle,
                ..TickCounters::default()
            },
            cores: [(0, busy), (1, quiet)].into(),
        })
    }

    fn memory_totals(&mut self) -> Result<MemoryTotals> {
        Ok(MemoryTotals {
            total: 8 * GIB,
            available: 4 * GIB,
        })
    }

    fn file_stores(&mut self) -> Result<Vec<FileStore>> {
        Ok(vec![
            FileStore {
                name: "nvme0n1p2".into(),
                mount: "/".into(),
                total_bytes: Some(100 * GIB),
                usable_bytes: 50 * GIB,
            },
            FileStore {
                name: "proc".into(),
                mount: "/proc".into(),
                total_bytes: None,
                usable_bytes: 0,
            },
        ])
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>> {
        Ok((1..=8)
            .map(|pid| ProcessSample {
                pid,
                name: format!("worker-{pid}"),
                cumulative_cpu_ms: u64::from(pid) * 100,
                run_time_ms: 10_000,
                resident_bytes: u64::from(pid) << 20,
            })
            .collect())
    }
}

#[test]
fn sampled_snapshot_renders_expected_dashboard() {
    let mut sampler = Sampler::new(SteadyHost { reads: 0 }).unwrap();
    let snapshot = sampler.sample().unwrap();

    assert!((snapshot.cpu_average_pct - 42.5).abs() < 1e-9);
    assert_eq!(snapshot.per_core_pct, vec![80.0, 5.0]);
    assert_eq!(snapshot.disks.len(), 1);
    assert_eq!(snapshot.top_processes.len(), 5);
    assert_eq!(snapshot.top_processes[0].pid, 8);

    let screen = render(&snapshot).unwrap();
    assert!(screen.contains(" 42.5% avg"));
    assert!(screen.contains("Memory: 4.0 GB / 8.0 GB  (50.0%)"));
    assert!(screen.contains("50.0 GB"));
    assert!(screen.contains("100.0 GB"));
    assert!(!screen.contains("/proc"));
    assert!(screen.contains("worker-8"));
    assert!(!screen.contains("worker-3"));
}

#[test]
fn every_tick_measures_only_its_own_interval() {
    let mut sampler = Sampler::new(SteadyHost { reads: 0 }).unwrap();
    for _ in 0..3 {
        let snapshot = sampler.sample().unwrap();
        assert_eq!(snapshot.per_core_pct, vec![80.0, 5.0]);
    }
    assert_eq!(sampler.source().reads, 4);
}
