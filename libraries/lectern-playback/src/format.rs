//! Display formatting helpers

/// Format seconds as `m:ss`
///
/// Minutes are unpadded, seconds floored and zero-padded. Non-finite or
/// negative input renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Fraction of the track played, in `[0, 1]`
///
/// Zero while the duration is unknown.
pub fn progress_fraction(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 && duration.is_finite() && current_time.is_finite() {
        (current_time / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(5.9), "0:05");
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(3600.0), "60:00");
    }

    #[test]
    fn invalid_input_formats_as_zero() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_fraction(60.0, 120.0), 0.5);
        assert_eq!(progress_fraction(130.0, 120.0), 1.0);
        assert_eq!(progress_fraction(10.0, 0.0), 0.0);
        assert_eq!(progress_fraction(f64::NAN, 120.0), 0.0);
    }
}
