use std::fmt::{self, Write};

pub const HELP_LINE: &str = "Press 'q' to quit. Refresh: 2s";

pub fn render(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "{HELP_LINE}")
}
