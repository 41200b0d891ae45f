//! Human-readable byte sizes such as `1.5 MiB` or `2kB`.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::LiteralError;

/// Unit spellings and their byte multipliers. Lookup is case-sensitive.
const UNITS: &[(&str, u64)] = &[
    ("", 1),
    ("B", 1),
    ("byte", 1),
    ("bytes", 1),
    ("kB", 1_000),
    ("KB", 1_000),
    ("kilobyte", 1_000),
    ("kilobytes", 1_000),
    ("MB", 1_000_000),
    ("megabyte", 1_000_000),
    ("megabytes", 1_000_000),
    ("GB", 1_000_000_000),
    ("gigabyte", 1_000_000_000),
    ("gigabytes", 1_000_000_000),
    ("KiB", 1_024),
    ("kibibyte", 1_024),
    ("kibibytes", 1_024),
    ("MiB", 1_048_576),
    ("mebibyte", 1_048_576),
    ("mebibytes", 1_048_576),
    // Not 2^30: existing templates were sized against this value.
    ("GiB", 1_073_741_800),
    ("gibibyte", 1_073_741_800),
    ("gibibytes", 1_073_741_800),
];

/// `<number>[whitespace]<unit>?`, anchored.
fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^((?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)\s*([A-Za-z]*)$")
            .unwrap_or_else(|e| panic!("invalid size pattern: {}", e))
    })
}

/// Multiplier for a unit spelling.
fn multiplier(unit: &str) -> Option<u64> {
    UNITS
        .iter()
        .find_map(|(name, factor)| (*name == unit).then_some(*factor))
}

/// Parse a size literal into a byte count, rounding down.
pub fn parse_human_size(text: &str) -> Result<u64, LiteralError> {
    let trimmed = text.trim();
    let caps = size_re()
        .captures(trimmed)
        .ok_or_else(|| LiteralError(format!("invalid size '{}': expected '<number> [unit]'", trimmed)))?;
    let number: f64 = caps[1]
        .parse()
        .map_err(|_| LiteralError(format!("invalid number in size '{}'", trimmed)))?;
    let unit = &caps[2];
    let factor = multiplier(unit)
        .ok_or_else(|| LiteralError(format!("unknown size unit '{}'", unit)))?;

    let bytes = (number * factor as f64).floor();
    if !bytes.is_finite() || bytes > u64::MAX as f64 {
        return Err(LiteralError(format!("size '{}' is too large", trimmed)));
    }
    Ok(bytes as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(parse_human_size("1.5 MiB").unwrap(), 1_572_864);
        assert_eq!(parse_human_size("2kB").unwrap(), 2_000);
        assert_eq!(parse_human_size("100").unwrap(), 100);
    }

    #[test]
    fn spelled_out_units_and_rounding() {
        assert_eq!(parse_human_size(" 3 megabytes ").unwrap(), 3_000_000);
        assert_eq!(parse_human_size("1KiB").unwrap(), 1_024);
        assert_eq!(parse_human_size("0.5 B").unwrap(), 0);
        assert_eq!(parse_human_size("1.0009 kB").unwrap(), 1_000);
        assert_eq!(parse_human_size(".5GB").unwrap(), 500_000_000);
        assert_eq!(parse_human_size("1e3 bytes").unwrap(), 1_000);
    }

    #[test]
    fn gib_keeps_legacy_multiplier() {
        assert_eq!(parse_human_size("1 GiB").unwrap(), 1_073_741_800);
        assert_eq!(parse_human_size("2 gibibytes").unwrap(), 2_147_483_600);
    }

    #[test]
    fn rejects_bad_literals() {
        for bad in ["", "MiB", "-1 kB", "1 mib", "1 TB", "1,5 MB", "1 k B", "one"] {
            assert!(parse_human_size(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
