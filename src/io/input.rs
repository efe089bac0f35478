//! Reading the byte window to visualize.
//!
//! Regular files are memory-mapped and sliced, so large inputs are never
//! copied. Standard input cannot be mapped and is buffered instead.

use std::fs::File;
use std::io::{self, Read};
use std::ops::{Deref, Range};
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, warn};

use crate::error::{Result, VizError};
use crate::util::format::format_bytes;

/// Path that selects standard input or standard output.
pub const STDIO_PATH: &str = "-";

/// Bytes selected from an input, either mapped or owned.
pub enum InputWindow {
    Mapped { map: Mmap, range: Range<usize> },
    Owned(Vec<u8>),
}

impl InputWindow {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Mapped { map, range } => &map[range.clone()],
            Self::Owned(bytes) => bytes,
        }
    }
}

impl Deref for InputWindow {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Check that `start..end` is a usable window. `end == 0` means end of input.
fn check_offsets(start: u64, end: u64) -> Result<()> {
    if end != 0 && end <= start {
        return Err(VizError::InvalidWindow(format!(
            "end offset {end:#x} must be greater than start offset {start:#x}"
        )));
    }
    Ok(())
}

/// Resolve the window against a known input size.
fn window_range(start: u64, end: u64, size: u64) -> Result<Range<usize>> {
    check_offsets(start, end)?;
    if start > size {
        return Err(VizError::InvalidWindow(format!(
            "start offset {start:#x} is beyond the end of the input ({size:#x} bytes)"
        )));
    }
    let end = if end == 0 { size } else { end };
    if end > size {
        return Err(VizError::InvalidWindow(format!(
            "end offset {end:#x} is beyond the end of the input ({size:#x} bytes)"
        )));
    }

    let to_usize = |v: u64| {
        usize::try_from(v).map_err(|_| {
            VizError::InvalidWindow(format!("offset {v:#x} does not fit in memory"))
        })
    };
    Ok(to_usize(start)?..to_usize(end)?)
}

/// Read the window of `reader` between `start` and `end`.
///
/// The first `start` bytes are discarded; a stream shorter than that is an
/// error. With `end == 0` everything up to end of stream is kept.
pub fn read_window_from<R: Read>(mut reader: R, start: u64, end: u64) -> Result<Vec<u8>> {
    check_offsets(start, end)?;

    let skipped = io::copy(&mut reader.by_ref().take(start), &mut io::sink())?;
    if skipped < start {
        return Err(VizError::InvalidWindow(format!(
            "start offset {start:#x} is beyond the end of the input ({skipped:#x} bytes)"
        )));
    }

    let mut bytes = Vec::new();
    if end == 0 {
        reader.read_to_end(&mut bytes)?;
    } else {
        let wanted = end - start;
        reader.take(wanted).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < wanted {
            return Err(VizError::InvalidWindow(format!(
                "end offset {end:#x} is beyond the end of the input ({:#x} bytes)",
                start + bytes.len() as u64
            )));
        }
    }
    Ok(bytes)
}

/// Memory-map the file at `path` and select the window between `start` and
/// `end`.
pub fn map_window(path: &Path, start: u64, end: u64) -> Result<InputWindow> {
    let file = File::open(path).map_err(|e| VizError::file(path, e))?;
    let size = file.metadata().map_err(|e| VizError::file(path, e))?.len();
    let range = window_range(start, end, size)?;

    // Zero-length mappings are rejected by the OS
    if size == 0 {
        return Ok(InputWindow::Owned(Vec::new()));
    }

    // SAFETY: the map is read-only and lives as long as the window; a file
    // truncated concurrently is outside what the tool supports.
    let map = unsafe { Mmap::map(&file) }.map_err(|e| VizError::file(path, e))?;
    Ok(InputWindow::Mapped { map, range })
}

/// Read the selected window of `path`, or of standard input if `path` is `-`.
pub fn read_window(path: &Path, start: u64, end: u64) -> Result<InputWindow> {
    let window = if path.as_os_str() == STDIO_PATH {
        InputWindow::Owned(read_window_from(io::stdin().lock(), start, end)?)
    } else {
        map_window(path, start, end)?
    };

    if window.is_empty() {
        warn!(path = %path.display(), "Input window is empty");
    } else {
        debug!(
            path = %path.display(),
            start,
            size = %format_bytes(window.len() as u64),
            "Read input window"
        );
    }
    Ok(window)
}
