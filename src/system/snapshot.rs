use chrono::NaiveDateTime;

use super::process::ProcessInfo;

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceSnapshot {
    pub cpu_average_pct: f64,
    pub per_core_pct: Vec<f64>,
    pub total_memory_bytes: u64,
    pub used_memory_bytes: u64,
    pub disks: Vec<DiskUsage>,
    pub top_processes: Vec<ProcessInfo>,
    pub timestamp: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskUsage {
    pub name: String,
    pub mount: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
}
