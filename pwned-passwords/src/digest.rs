use std::fmt;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::error::Error;

/// Length of a hex-encoded SHA-1 digest.
pub const DIGEST_HEX_LEN: usize = 40;

/// Number of leading hex characters disclosed to the service.
pub const PREFIX_LEN: usize = 5;

/// Number of trailing hex characters matched locally.
pub const SUFFIX_LEN: usize = DIGEST_HEX_LEN - PREFIX_LEN;

/// Hex lookup table for digest encoding.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Convert hex ASCII character to nibble value (0-15)
#[inline]
pub const fn hex_to_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Returns true when `value` is exactly 40 hex digits, in either case.
pub const fn looks_like_sha1(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != DIGEST_HEX_LEN {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_hexdigit() {
            return false;
        }
        i += 1;
    }
    true
}

/// Uppercase hex SHA-1 digest of a password.
///
/// Always holds exactly 40 ASCII characters from `0-9A-F`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordDigest([u8; DIGEST_HEX_LEN]);

impl PasswordDigest {
    /// Normalizes raw input into a digest.
    ///
    /// Input that already looks like a SHA-1 digest is taken as-is unless
    /// `plain_text` is set, in which case it is hashed like any other password.
    pub fn normalize(input: &str, plain_text: bool) -> Self {
        if !plain_text && looks_like_sha1(input) {
            let mut out = [0u8; DIGEST_HEX_LEN];
            for (dst, src) in out.iter_mut().zip(input.bytes()) {
                *dst = src.to_ascii_uppercase();
            }
            Self(out)
        } else {
            Self::hash(input)
        }
    }

    /// Hashes the UTF-8 bytes of `password`.
    pub fn hash(password: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password.as_bytes());
        let hash: [u8; 20] = hasher.finalize().into();

        let mut out = [0u8; DIGEST_HEX_LEN];
        for (i, byte) in hash.iter().enumerate() {
            out[i * 2] = HEX_CHARS[(byte >> 4) as usize];
            out[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
        }
        Self(out)
    }

    /// Parses an existing hex digest, rejecting anything that is not 40 hex digits.
    pub fn from_hex(value: &str) -> Result<Self, Error> {
        if !looks_like_sha1(value) {
            return Err(Error::InvalidInput(format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {:?}",
                value
            )));
        }
        Ok(Self::normalize(value, false))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: every constructor only stores ASCII hex digits.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// The 5-character prefix sent to the range endpoint.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.as_str()[..PREFIX_LEN]
    }

    /// The 35-character suffix that never leaves the client in range mode.
    #[inline]
    pub fn suffix(&self) -> &str {
        &self.as_str()[PREFIX_LEN..]
    }

    /// Raw 20-byte SHA-1 value.
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        for (i, pair) in self.0.chunks_exact(2).enumerate() {
            // Stored bytes are always hex, so the fallback is unreachable.
            let hi = hex_to_nibble(pair[0]).unwrap_or(0);
            let lo = hex_to_nibble(pair[1]).unwrap_or(0);
            out[i] = (hi << 4) | lo;
        }
        out
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&self.as_str()).finish()
    }
}

impl FromStr for PasswordDigest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Normalizes `input` into a digest. See [`PasswordDigest::normalize`].
pub fn normalize(input: &str, plain_text: bool) -> PasswordDigest {
    PasswordDigest::normalize(input, plain_text)
}
