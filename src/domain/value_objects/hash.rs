//! Content Hash Value Object
//!
//! SHA-256 digest of an exported database file, printed so users can verify
//! a copy before importing it elsewhere.

use std::fmt;
use std::io::{self, Read};

use sha2::{Digest, Sha256};

/// A SHA-256 digest, displayed with the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    hex: String,
}

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Hash everything readable from `reader` without buffering it whole.
    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Self {
            hex: format!("{:x}", hasher.finalize()),
        })
    }

    /// Just the hex part, as `sha256sum` prints it.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.hex)
    }
}
