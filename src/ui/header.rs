use std::fmt::{self, Write};

use crate::format::{bar, human_bytes, percent_of};
use crate::system::snapshot::ResourceSnapshot;

use super::BAR_WIDTH;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_title(out: &mut impl Write, snapshot: &ResourceSnapshot) -> fmt::Result {
    writeln!(
        out,
        "System Resource Monitor  {}",
        snapshot.timestamp.format(TIMESTAMP_FORMAT)
    )
}

pub fn render_cpu(out: &mut impl Write, snapshot: &ResourceSnapshot) -> fmt::Result {
    writeln!(out, "CPU Usage: {:>5.1}% avg", snapshot.cpu_average_pct)?;
    for (core, pct) in snapshot.per_core_pct.iter().enumerate() {
        writeln!(out, "  Core {core:>2}: {pct:>5.1}% {}", bar(*pct, BAR_WIDTH))?;
    }
    Ok(())
}

pub fn render_memory(out: &mut impl Write, snapshot: &ResourceSnapshot) -> fmt::Result {
    let used = snapshot.used_memory_bytes;
    let total = snapshot.total_memory_bytes;
    writeln!(
        out,
        "Memory: {} / {}  ({:>4.1}%)",
        human_bytes(used.into()),
        human_bytes(total.into()),
        percent_of(used, total)
    )
}
