//! NDJSON output for `--json`.
//!
//! One JSON object per line on stdout. Typed events live in `events`.

pub mod events;

use serde::Serialize;
use std::io::{self, Write};

/// Write a typed event to `out` as one line.
pub fn write_event<T: Serialize, W: Write + ?Sized>(out: &mut W, event: &T) -> io::Result<()> {
    let json =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Emit a typed event to stdout.
pub fn emit_event<T: Serialize>(event: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, event)
}

/// Emit `data` for `command` wrapped in a [`events::DataEvent`].
pub fn emit_data<T: Serialize>(command: &str, data: T) -> io::Result<()> {
    emit_event(&events::DataEvent::new(command, data))
}
