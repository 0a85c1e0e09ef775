//! Lays a [`ResourceSnapshot`] out as fixed-width text.
//!
//! Nothing here touches the terminal or the clock: the same snapshot always
//! renders to the same bytes.

pub mod header;
pub mod help;
pub mod tables;

use std::fmt::Write;

use color_eyre::Result;

use crate::system::snapshot::ResourceSnapshot;

pub const SCREEN_WIDTH: usize = 80;

pub const BAR_WIDTH: usize = 30;

pub fn render(snapshot: &ResourceSnapshot) -> Result<String> {
    let mut out = String::with_capacity(4096);

    header::render_title(&mut out, snapshot)?;
    rule(&mut out)?;
    header::render_cpu(&mut out, snapshot)?;
    rule(&mut out)?;
    header::render_memory(&mut out, snapshot)?;
    rule(&mut out)?;
    tables::render_disks(&mut out, &snapshot.disks)?;
    rule(&mut out)?;
    tables::render_processes(&mut out, &snapshot.top_processes)?;
    rule(&mut out)?;
    help::render(&mut out)?;

    Ok(out)
}

pub fn rule(out: &mut impl Write) -> std::fmt::Result {
    writeln!(out, "{}", "-".repeat(SCREEN_WIDTH))
}
