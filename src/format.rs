// Human-readable sizes, durations and timestamps for the text report

use chrono::{DateTime, Local};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Binary units, two decimals above plain bytes: `512 B`, `1.50 KB`, `3.25 GB`.
pub fn human_bytes(bytes: u64) -> String {
    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

/// `1d 2h 3m 4s`; leading zero units are dropped, seconds always shown.
pub fn human_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    let secs = seconds % 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Epoch seconds as local time, `%Y-%m-%d %H:%M:%S`. Out-of-range values print raw.
pub fn human_boot_time(epoch_secs: u64) -> String {
    i64::try_from(epoch_secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| epoch_secs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pick_largest_unit() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(1023), "1023 B");
        assert_eq!(human_bytes(1024), "1.00 KB");
        assert_eq!(human_bytes(1536), "1.50 KB");
        assert_eq!(human_bytes(5 * MB), "5.00 MB");
        assert_eq!(human_bytes(16 * GB + GB / 4), "16.25 GB");
    }

    #[test]
    fn terabytes_stay_in_gb() {
        assert_eq!(human_bytes(2048 * GB), "2048.00 GB");
    }

    #[test]
    fn duration_drops_leading_zero_units() {
        assert_eq!(human_duration(0), "0s");
        assert_eq!(human_duration(59), "59s");
        assert_eq!(human_duration(61), "1m 1s");
        assert_eq!(human_duration(3_600), "1h 0m 0s");
        assert_eq!(human_duration(93_784), "1d 2h 3m 4s");
    }

    #[test]
    fn boot_time_has_fixed_width_layout() {
        let s = human_boot_time(1_700_000_000);
        assert_eq!(s.len(), "2023-11-14 22:13:20".len());
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
    }

    #[test]
    fn boot_time_out_of_range_prints_raw() {
        assert_eq!(human_boot_time(u64::MAX), u64::MAX.to_string());
    }
}
