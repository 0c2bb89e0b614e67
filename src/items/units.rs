//! Volume units

/// Abbreviation shown next to storage columns
pub const VOLUME_UNITS_ABBR: &str = "L";

/// Format milliliters as liters with two decimals
pub fn format_volume(ml: u32) -> String {
    format!("{}.{:02}", ml / 1000, (ml % 1000) / 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0), "0.00");
        assert_eq!(format_volume(250), "0.25");
        assert_eq!(format_volume(12_500), "12.50");
        assert_eq!(format_volume(1_005), "1.00");
    }
}
