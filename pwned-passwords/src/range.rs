use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::digest::{PREFIX_LEN, PasswordDigest, SUFFIX_LEN};
use crate::error::Error;

/// Every suffix the service returned for one 5-character prefix, with its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBucket {
    prefix: String,
    entries: HashMap<String, u64>,
}

impl RangeBucket {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Count for a 35-character suffix, case-insensitively.
    pub fn get(&self, suffix: &str) -> Option<u64> {
        self.entries.get(&suffix.to_ascii_uppercase()).copied()
    }

    /// Breach count for `digest`, or 0 when its suffix is absent.
    pub fn count_for(&self, digest: &PasswordDigest) -> u64 {
        self.entries.get(digest.suffix()).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(suffix, count)| (suffix.as_str(), *count))
    }
}

/// Parses a `/range/{prefix}` response body.
///
/// Lines are `SUFFIX:COUNT`. A leading byte-order mark and empty lines are
/// ignored; any other malformed line fails the whole bucket.
pub fn parse_range_body(prefix: &str, body: &str) -> Result<RangeBucket, Error> {
    if prefix.len() != PREFIX_LEN || !prefix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidInput(format!("invalid range prefix {:?}", prefix)));
    }

    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    let mut entries = HashMap::with_capacity(2048);

    for (idx, line) in body.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let (suffix, count) = parse_line(line)
            .map_err(|reason| Error::MalformedResponse(format!("line {}: {reason}", idx + 1)))?;

        match entries.entry(suffix) {
            Entry::Vacant(slot) => {
                slot.insert(count);
            }
            Entry::Occupied(slot) => {
                return Err(Error::MalformedResponse(format!(
                    "line {}: duplicate suffix {}",
                    idx + 1,
                    slot.key()
                )));
            }
        }
    }

    Ok(RangeBucket { prefix: prefix.to_ascii_uppercase(), entries })
}

fn parse_line(line: &str) -> Result<(String, u64), String> {
    let (suffix, count) = line.split_once(':').ok_or_else(|| format!("missing ':' in {line:?}"))?;

    if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected {SUFFIX_LEN} hex characters, got {suffix:?}"));
    }

    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid count {count:?}: {e}"))?;

    Ok((suffix.to_ascii_uppercase(), count))
}
