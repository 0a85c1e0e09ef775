use std::collections::BTreeMap;
use std::fs;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use sysinfo::System;

use super::TickReader;
use crate::system::source::{CpuTicks, TickCounters};

const PROC_STAT: &str = "/proc/stat";
const PROC_UPTIME: &str = "/proc/uptime";
/// Clock ticks per second in `/proc/<pid>/stat` (the kernel's `USER_HZ`).
const USER_HZ: u64 = 100;

#[derive(Debug, Default)]
pub struct PlatformTicks;

impl TickReader for PlatformTicks {
    fn read_ticks(&mut self, _sys: &mut System) -> Result<CpuTicks> {
        let contents =
            fs::read_to_string(PROC_STAT).wrap_err_with(|| format!("failed to read {PROC_STAT}"))?;
        parse_proc_stat(&contents)
    }
}

/// Parses the `cpu` and `cpuN` lines of `/proc/stat` (see `proc_stat(5)`).
///
/// Fields after `steal` (guest time) are already part of `user` and are
/// ignored. Kernels older than 2.6.11 report fewer fields; missing ones read
/// as zero.
pub fn parse_proc_stat(contents: &str) -> Result<CpuTicks> {
    let mut system = None;
    let mut cores = BTreeMap::new();

    for line in contents.lines() {
        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            continue;
        };
        let Some(suffix) = kind.strip_prefix("cpu") else {
            continue;
        };
        let counters = parse_counters(tokens).wrap_err_with(|| format!("malformed `{kind}` line"))?;
        if suffix.is_empty() {
            system = Some(counters);
        } else {
            let id: u32 = suffix
                .parse()
                .wrap_err_with(|| format!("invalid cpu id in `{kind}`"))?;
            cores.insert(id, counters);
        }
    }

    let system = system.ok_or_else(|| eyre!("{PROC_STAT} has no aggregate `cpu` line"))?;
    Ok(CpuTicks { system, cores })
}

#[derive(Debug)]
pub struct ProcessClock {
    uptime_ms: Option<u64>,
}

impl ProcessClock {
    pub fn capture() -> Self {
        let uptime_ms = fs::read_to_string(PROC_UPTIME)
            .ok()
            .and_then(|contents| parse_uptime_ms(&contents));
        ProcessClock { uptime_ms }
    }

    /// Falls back to `coarse_secs` when the process's start time cannot be
    /// read, e.g. because it exited mid-listing.
    pub fn run_time_ms(&self, pid: u32, coarse_secs: u64) -> u64 {
        let fine = self.uptime_ms.and_then(|uptime_ms| {
            let stat = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
            let start_ms = parse_start_ms(&stat)?;
            Some(uptime_ms.saturating_sub(start_ms))
        });
        fine.unwrap_or_else(|| coarse_secs.saturating_mul(1000))
    }
}

fn parse_uptime_ms(contents: &str) -> Option<u64> {
    let secs: f64 = contents.split_whitespace().next()?.parse().ok()?;
    Some((secs * 1000.0) as u64)
}

/// `starttime` (field 22) in ms since boot. The command name in field 2 may
/// contain spaces and parentheses, so fields are counted after the last `)`.
fn parse_start_ms(stat: &str) -> Option<u64> {
    let (_, rest) = stat.rsplit_once(')')?;
    let ticks: u64 = rest.split_whitespace().nth(19)?.parse().ok()?;
    Some(ticks.saturating_mul(1000) / USER_HZ)
}

fn parse_counters<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<TickCounters> {
    let values = tokens
        .take(8)
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() < 4 {
        return Err(eyre!("expected at least 4 counters, found {}", values.len()));
    }
    let field = |i: usize| values.get(i).copied().unwrap_or(0);
    Ok(TickCounters {
        user: field(0),
        nice: field(1),
        system: field(2),
        idle: field(3),
        iowait: field(4),
        irq: field(5),
        softirq: field(6),
        steal: field(7),
    })
}
