// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Text formatting for times shown in the UI.

/// Formats a whole number of seconds as `MM:SS`.
///
/// Minutes are not carried into hours, so `3600` is `60:00`.
pub(crate) fn format_time(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Elapsed and remaining time for the player panel, `MM:SS / MM:SS (-MM:SS)`.
pub(crate) fn format_progress(position_ms: u64, duration_ms: u64) -> String {
    let elapsed = position_ms / 1000;
    let total = duration_ms / 1000;
    format!(
        "{} / {} (-{})",
        format_time(elapsed),
        format_time(total),
        format_time(total.saturating_sub(elapsed))
    )
}

/// The played proportion of a song, `0.0..=1.0`.
pub(crate) fn progress_ratio(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_format_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn progress_shows_remaining_time() {
        assert_eq!(format_progress(61_500, 180_000), "01:01 / 03:00 (-01:59)");
        assert_eq!(format_progress(5_000, 0), "00:05 / 00:00 (-00:00)");
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(progress_ratio(0, 0), 0.0);
        assert_eq!(progress_ratio(30_000, 60_000), 0.5);
        assert_eq!(progress_ratio(90_000, 60_000), 1.0);
    }
}
