/// Parses an nginx-style size such as `10M`, `512k` or `1048576`.
///
/// Suffixes `k`/`K` and `m`/`M` multiply by 1024 and 1024², `g`/`G` by 1024³. A bare
/// number is taken as bytes.
///
/// # Arguments
/// - `value` - The size string to parse
///
/// # Returns
/// - `Ok(usize)` - Size in bytes
/// - `Err(String)` - Reason the value could not be parsed
pub fn parse_size(value: &str) -> Result<usize, String> {
    let value = value.trim();
    let (digits, multiplier) = match value.chars().last() {
        Some('k' | 'K') => (&value[..value.len() - 1], 1024),
        Some('m' | 'M') => (&value[..value.len() - 1], 1024 * 1024),
        Some('g' | 'G') => (&value[..value.len() - 1], 1024 * 1024 * 1024),
        Some(_) => (value, 1),
        None => return Err("empty size".to_string()),
    };

    let number = digits
        .parse::<usize>()
        .map_err(|e| format!("'{}' is not a number: {}", digits, e))?;

    number
        .checked_mul(multiplier)
        .ok_or_else(|| "size overflows".to_string())
}

/// Formats a byte count with the largest exact nginx suffix.
///
/// `10485760` becomes `10M`, `1536` becomes `1536` rather than a rounded `1.5k`.
pub fn format_size(bytes: usize) -> String {
    const UNITS: [(usize, &str); 3] = [(1024 * 1024 * 1024, "G"), (1024 * 1024, "M"), (1024, "k")];

    for (unit, suffix) in UNITS {
        if bytes >= unit && bytes % unit == 0 {
            return format!("{}{}", bytes / unit, suffix);
        }
    }

    bytes.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_sizes() {
        assert_eq!(parse_size("10M"), Ok(10 * 1024 * 1024));
        assert_eq!(parse_size("512k"), Ok(512 * 1024));
        assert_eq!(parse_size("1G"), Ok(1024 * 1024 * 1024));
        assert_eq!(parse_size(" 2048 "), Ok(2048));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_size("").is_err());
        assert!(parse_size("M").is_err());
        assert!(parse_size("ten").is_err());
        assert!(parse_size("-1k").is_err());
    }

    #[test]
    fn formats_exact_units_only() {
        assert_eq!(format_size(10 * 1024 * 1024), "10M");
        assert_eq!(format_size(2048), "2k");
        assert_eq!(format_size(1536), "1536");
        assert_eq!(format_size(0), "0");
    }
}
