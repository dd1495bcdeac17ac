use super::constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Render a seconds count as `HH:MM:SS`.
///
/// Every unit is padded to two digits. Hours are not capped, so very long
/// recordings render as `100:00:00` rather than wrapping.
pub fn convert_duration_to_time_string(duration: u64) -> String {
    let hours = duration / SECONDS_PER_HOUR;
    let minutes = (duration % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = duration % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zeroes() {
        assert_eq!(convert_duration_to_time_string(0), "00:00:00");
    }

    #[test]
    fn minutes_and_seconds_are_padded() {
        assert_eq!(convert_duration_to_time_string(65), "00:01:05");
        assert_eq!(convert_duration_to_time_string(3725), "01:02:05");
    }

    #[test]
    fn hours_are_not_truncated() {
        assert_eq!(convert_duration_to_time_string(360_000), "100:00:00");
        assert_eq!(convert_duration_to_time_string(359_999), "99:59:59");
    }
}
