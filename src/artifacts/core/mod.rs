//! Output helpers shared by commands

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Setting this variable to any value disables the pager
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Whether long output should go through the pager
///
/// Only when stdout is a terminal and `NO_PAGER` is unset.
pub fn pager_enabled() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal()
}

/// `Write` adapter over a minus pager
///
/// Bytes are pushed to the pager as UTF-8 text; the pager is shown with
/// `minus::page_all` once the command is done writing.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
