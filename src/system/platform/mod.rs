//! Per-OS CPU tick counters and process clocks. Every `target_os` switch in the crate lives here.

use color_eyre::Result;
use sysinfo::System;

use super::source::CpuTicks;

pub trait TickReader {
    fn read_ticks(&mut self, sys: &mut System) -> Result<CpuTicks>;
}

#[cfg(not(target_os = "linux"))]
mod emulated;
#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
use emulated as platform_impl;
#[cfg(target_os = "linux")]
use linux as platform_impl;

pub use platform_impl::{PlatformTicks, ProcessClock};
