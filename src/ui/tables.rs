use std::fmt::{self, Write};

use crate::format::{fit_column, human_bytes};
use crate::system::process::ProcessInfo;
use crate::system::snapshot::DiskUsage;

const DISK_NAME_WIDTH: usize = 22;
const DISK_MOUNT_WIDTH: usize = 20;
const DISK_USED_WIDTH: usize = 10;
const DISK_TOTAL_WIDTH: usize = 12;

const PROC_PID_WIDTH: usize = 7;
const PROC_NAME_WIDTH: usize = 28;
const PROC_CPU_WIDTH: usize = 8;
const PROC_RSS_WIDTH: usize = 10;

pub fn render_disks(out: &mut impl Write, disks: &[DiskUsage]) -> fmt::Result {
    writeln!(out, "Disks:")?;
    writeln!(
        out,
        "  {} {} {:>used$} {:>total$}",
        fit_column("Name", DISK_NAME_WIDTH),
        fit_column("Mount", DISK_MOUNT_WIDTH),
        "Used",
        "Total",
        used = DISK_USED_WIDTH,
        total = DISK_TOTAL_WIDTH,
    )?;
    for disk in disks {
        writeln!(
            out,
            "  {} {} {:>used$} {:>total$}",
            fit_column(&disk.name, DISK_NAME_WIDTH),
            fit_column(&disk.mount, DISK_MOUNT_WIDTH),
            human_bytes(disk.used_bytes.into()),
            human_bytes(disk.total_bytes.into()),
            used = DISK_USED_WIDTH,
            total = DISK_TOTAL_WIDTH,
        )?;
    }
    Ok(())
}

pub fn render_processes(out: &mut impl Write, processes: &[ProcessInfo]) -> fmt::Result {
    writeln!(out, "Top Processes (by CPU):")?;
    writeln!(
        out,
        "  {:<pid$} {} {:>cpu$} {:>rss$}",
        "PID",
        fit_column("Name", PROC_NAME_WIDTH),
        "CPU%",
        "RSS",
        pid = PROC_PID_WIDTH,
        cpu = PROC_CPU_WIDTH,
        rss = PROC_RSS_WIDTH,
    )?;
    for process in processes {
        writeln!(
            out,
            "  {:<pid$} {} {:>cpu$.2} {:>rss$}",
            process.pid,
            fit_column(&process.name, PROC_NAME_WIDTH),
            process.cpu_load_pct,
            human_bytes(process.resident_set_size.into()),
            pid = PROC_PID_WIDTH,
            cpu = PROC_CPU_WIDTH,
            rss = PROC_RSS_WIDTH,
        )?;
    }
    Ok(())
}
