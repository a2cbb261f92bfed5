//! Reading commands typed (or piped) into `krnr record`.

use std::io::{self, BufReader, Read};

const SENTINELS: [&str; 3] = [":end", ":save", ":quit"];
/// ASCII SUB, what Ctrl+Z produces on Windows consoles.
const SUB: u8 = 0x1A;

struct Collector {
    commands: Vec<String>,
    line: Vec<u8>,
}

impl Collector {
    /// Returns `true` when the line was a stop sentinel.
    fn finish_line(&mut self) -> bool {
        let raw = std::mem::take(&mut self.line);
        let text = String::from_utf8_lossy(&raw);
        let trimmed = text.trim();
        if SENTINELS.contains(&trimmed) {
            return true;
        }
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            self.commands.push(trimmed.to_string());
        }
        false
    }

    fn flush_partial(mut self) -> Vec<String> {
        if !self.line.is_empty() {
            self.finish_line();
        }
        self.commands
    }
}

/// Read commands from `reader` until EOF or a stop marker.
///
/// Stop markers are the lines `:end`, `:save` and `:quit`, the SUB byte, and
/// the two-character echo `^Z` some consoles print instead. Lines are trimmed;
/// blank lines and `#` comments are skipped.
pub fn record_commands(reader: impl Read) -> io::Result<Vec<String>> {
    let mut bytes = BufReader::new(reader).bytes();
    let mut collector = Collector {
        commands: Vec::new(),
        line: Vec::new(),
    };

    while let Some(b) = bytes.next() {
        match b? {
            SUB => return Ok(collector.flush_partial()),
            b'^' => match bytes.next().transpose()? {
                Some(b'Z' | b'z') => return Ok(collector.flush_partial()),
                Some(next) => {
                    collector.line.push(b'^');
                    if next == b'\n' {
                        if collector.finish_line() {
                            return Ok(collector.commands);
                        }
                    } else {
                        collector.line.push(next);
                    }
                }
                None => {
                    collector.line.push(b'^');
                    return Ok(collector.flush_partial());
                }
            },
            b'\n' => {
                if collector.finish_line() {
                    return Ok(collector.commands);
                }
            }
            other => collector.line.push(other),
        }
    }

    Ok(collector.flush_partial())
}
