//! Version domain types
//!
//! Pack versions come from the registry and from locally built packs, so neither
//! source is trusted to be well formed. Parsing never fails loudly: a malformed
//! version simply has no [`PackVersion`] and sorts below every parseable one.

use std::cmp::Ordering;
use std::fmt;

use semver::Prerelease;

use crate::error::{Result, toolchain::invalid_version};

/// Suffix carried by locally built (development) packs
pub const DEV_SUFFIX: &str = "-dev";

/// A parsed pack version: `major.minor.patch[.revision][-prerelease][+metadata]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub revision: u64,
    pub pre: Prerelease,
}

impl PackVersion {
    /// Parse a version string, returning `None` when it is malformed
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let without_metadata = input.split_once('+').map_or(input, |(v, _)| v);
        let (core, pre) = match without_metadata.split_once('-') {
            Some((core, pre)) => (core, Prerelease::new(pre).ok().filter(|p| !p.is_empty())?),
            None => (without_metadata, Prerelease::EMPTY),
        };

        let parts: Vec<u64> = core
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<_>>()?;
        if parts.is_empty() || parts.len() > 4 {
            return None;
        }

        let part = |i: usize| parts.get(i).copied().unwrap_or(0);
        Some(Self {
            major: part(0),
            minor: part(1),
            patch: part(2),
            revision: part(3),
            pre,
        })
    }

    /// Whether this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl Ord for PackVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.revision)
            .cmp(&(other.major, other.minor, other.patch, other.revision))
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

impl PartialOrd for PackVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.revision > 0 {
            write!(f, ".{}", self.revision)?;
        }
        if self.is_prerelease() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}

/// Whether a version string denotes a locally built development pack
pub fn is_dev_build(version: &str) -> bool {
    version.ends_with(DEV_SUFFIX)
}

/// Compare two version strings semantically
///
/// Returns `None` when either side is malformed; such pairs are non-comparable.
pub fn compare(left: &str, right: &str) -> Option<Ordering> {
    Some(PackVersion::parse(left)?.cmp(&PackVersion::parse(right)?))
}

/// Total order over version strings where malformed versions sort lowest
pub fn total_order(left: &str, right: &str) -> Ordering {
    PackVersion::parse(left).cmp(&PackVersion::parse(right))
}

/// A toolchain feature band: `major.minor.patch` with patch rounded down to the hundred
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionBand {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Oldest feature band this tool can register packs into
pub const MINIMUM_BAND: VersionBand = VersionBand {
    major: 8,
    minor: 0,
    patch: 100,
};

impl VersionBand {
    /// Derive the band from a full toolchain version string (e.g. `8.0.204` -> `8.0.200`)
    pub fn from_version(version: &str) -> Result<Self> {
        let parsed = PackVersion::parse(version).ok_or_else(|| invalid_version(version))?;
        Ok(Self {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch / 100 * 100,
        })
    }

    pub fn is_supported(&self) -> bool {
        *self >= MINIMUM_BAND
    }
}

impl fmt::Display for VersionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release() {
        let v = PackVersion::parse("8.0.100").unwrap();
        assert_eq!((v.major, v.minor, v.patch, v.revision), (8, 0, 100, 0));
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_parse_four_part_and_prerelease() {
        let v = PackVersion::parse("1.2.3.4-dev").unwrap();
        assert_eq!(v.revision, 4);
        assert_eq!(v.pre.as_str(), "dev");
        assert_eq!(v.to_string(), "1.2.3.4-dev");
    }

    #[test]
    fn test_parse_ignores_build_metadata() {
        let v = PackVersion::parse("8.0.100+abc123").unwrap();
        assert_eq!(v, PackVersion::parse("8.0.100").unwrap());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(PackVersion::parse("").is_none());
        assert!(PackVersion::parse("latest").is_none());
        assert!(PackVersion::parse("1.x.0").is_none());
        assert!(PackVersion::parse("1.0.0-").is_none());
        assert!(PackVersion::parse("1.2.3.4.5").is_none());
    }

    #[test]
    fn test_ordering() {
        assert_eq!(compare("8.0.200", "8.0.100"), Some(Ordering::Greater));
        assert_eq!(compare("2.1.0-dev", "2.0.300"), Some(Ordering::Greater));
        assert_eq!(compare("2.1.0-dev", "2.1.0"), Some(Ordering::Less));
        assert_eq!(compare("1.0.0.1", "1.0.0"), Some(Ordering::Greater));
        assert_eq!(compare("8.0.100", "8.0.100"), Some(Ordering::Equal));
    }

    #[test]
    fn test_malformed_is_non_comparable() {
        assert_eq!(compare("garbage", "8.0.100"), None);
        assert_eq!(compare("8.0.100", "garbage"), None);
    }

    #[test]
    fn test_total_order_puts_malformed_lowest() {
        assert_eq!(total_order("garbage", "0.0.1"), Ordering::Less);
        assert_eq!(total_order("0.0.1", "garbage"), Ordering::Greater);
    }

    #[test]
    fn test_is_dev_build() {
        assert!(is_dev_build("2.1.0-dev"));
        assert!(!is_dev_build("2.1.0"));
        assert!(!is_dev_build("2.1.0-preview.1"));
    }

    #[test]
    fn test_band_rounds_patch_down() {
        let band = VersionBand::from_version("8.0.204").unwrap();
        assert_eq!(band.to_string(), "8.0.200");
        let band = VersionBand::from_version("9.0.100-preview.7.24407.12").unwrap();
        assert_eq!(band.to_string(), "9.0.100");
        let band = VersionBand::from_version("8.0.99").unwrap();
        assert_eq!(band.to_string(), "8.0.0");
    }

    #[test]
    fn test_band_invalid_version() {
        assert!(VersionBand::from_version("not-a-version").is_err());
    }

    #[test]
    fn test_band_support() {
        assert!(VersionBand::from_version("8.0.100").unwrap().is_supported());
        assert!(VersionBand::from_version("10.0.100").unwrap().is_supported());
        assert!(!VersionBand::from_version("7.0.400").unwrap().is_supported());
        assert!(!VersionBand::from_version("8.0.0").unwrap().is_supported());
    }
}
