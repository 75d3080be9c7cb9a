//! Mirror set
//!
//! Severities listed here are also written to their own log file, whatever
//! the file threshold says.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LogError;
use super::severity::Severity;

/// Bits that may be set in a raw mirror mask
const VALID_BITS: u32 = 0xF;

/// Set of mirrored severities
///
/// Only Error, Warning, Information and Verbose can be members, so any value
/// of this type is a legal mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Severity>", into = "Vec<Severity>")]
pub struct MirrorSet {
    bits: u8,
}

impl MirrorSet {
    /// Empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a raw mask, rejecting anything with bit 4 or above set
    pub fn from_bits(bits: u32) -> Result<Self, LogError> {
        if bits & !VALID_BITS != 0 {
            return Err(LogError::InvalidMirrorMask(bits));
        }
        Ok(Self { bits: bits as u8 })
    }

    /// Raw mask value
    pub fn bits(self) -> u32 {
        u32::from(self.bits)
    }

    /// Add a severity; `None` is ignored
    pub fn insert(&mut self, severity: Severity) {
        self.bits |= severity.bits() as u8;
    }

    /// Builder-style `insert`
    pub fn with(mut self, severity: Severity) -> Self {
        self.insert(severity);
        self
    }

    pub fn remove(&mut self, severity: Severity) {
        self.bits &= !(severity.bits() as u8);
    }

    /// Check membership; `None` is never a member
    pub fn contains(self, severity: Severity) -> bool {
        self.bits & severity.bits() as u8 != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Members in Error, Warning, Information, Verbose order
    pub fn iter(self) -> impl Iterator<Item = Severity> {
        Severity::MESSAGE_LEVELS
            .into_iter()
            .filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Severity> for MirrorSet {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        let mut set = MirrorSet::empty();
        for severity in iter {
            set.insert(severity);
        }
        set
    }
}

impl TryFrom<Vec<Severity>> for MirrorSet {
    type Error = LogError;

    fn try_from(levels: Vec<Severity>) -> Result<Self, Self::Error> {
        if levels.contains(&Severity::None) {
            return Err(LogError::NoneMirrored);
        }
        Ok(levels.into_iter().collect())
    }
}

impl From<MirrorSet> for Vec<Severity> {
    fn from(set: MirrorSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for MirrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.bits)
    }
}
