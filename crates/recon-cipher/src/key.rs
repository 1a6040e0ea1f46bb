//! Key material for a single reconciliation pass

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::tagged::CipherVariant;

/// Where the key comes from, as declared by the host.
///
/// Parsed from a single string: an absolute path names a key file, anything
/// else must be the raw hex key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum KeySource {
    Inline(String),
    File(PathBuf),
}

impl KeySource {
    pub fn parse(value: &str) -> Result<Self> {
        if Path::new(value).is_absolute() {
            return Ok(Self::File(PathBuf::from(value)));
        }

        let hex = chomp(value);
        if is_hex_key(hex) {
            Ok(Self::Inline(hex.to_string()))
        } else {
            Err(Error::InvalidKeySource)
        }
    }
}

impl FromStr for KeySource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeySource {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Inline(<redacted>)"),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// Raw key bytes, 16 or 32 long. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: Zeroizing<Vec<u8>>,
}

impl KeyMaterial {
    /// Decode a 32 or 64 character hex key. A trailing newline is ignored.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = chomp(hex);
        if !is_hex_key(hex) {
            return Err(Error::InvalidKey);
        }

        let bytes = hex::decode(hex).map_err(|_| Error::InvalidKey)?;
        Ok(Self {
            bytes: Zeroizing::new(bytes),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if CipherVariant::for_key_len(bytes.len()).is_none() {
            return Err(Error::InvalidKeyLength { len: bytes.len() });
        }

        Ok(Self {
            bytes: Zeroizing::new(bytes.to_vec()),
        })
    }

    /// Load the key named by `source`.
    ///
    /// A key file that does not exist yields `Ok(None)`: without a key the
    /// caller cannot compare and has to rewrite.
    pub fn resolve(source: &KeySource) -> Result<Option<Self>> {
        match source {
            KeySource::Inline(hex) => Self::from_hex(hex).map(Some),
            KeySource::File(path) => match fs::read_to_string(path) {
                Ok(contents) => {
                    let contents = Zeroizing::new(contents);
                    Self::from_hex(&contents).map(Some)
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "Key file doesn't exist");
                    Ok(None)
                }
                Err(e) => Err(Error::io(path, e)),
            },
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The cipher this key encrypts with.
    pub fn variant(&self) -> CipherVariant {
        match self.len() {
            16 => CipherVariant::Aes128Gcm,
            _ => CipherVariant::Aes256Gcm,
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn chomp(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .or_else(|| value.strip_suffix('\r'))
        .unwrap_or(value)
}

fn is_hex_key(value: &str) -> bool {
    matches!(value.len(), 32 | 64) && value.bytes().all(|b| b.is_ascii_hexdigit())
}
