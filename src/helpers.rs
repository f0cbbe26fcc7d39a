use std::time::Duration;

/// `mm:ss`, or `hh:mm:ss` once an hour has passed.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

pub fn row_label(row: usize) -> char {
    (b'A' + (row % 26) as u8) as char
}

/// Rows are lettered from `A`, columns numbered from `1`: `(1, 2)` is `B3`.
pub fn cell_label(row: usize, col: usize) -> String {
    format!("{}{}", row_label(row), col + 1)
}

/// Inverse of [`cell_label`], case-insensitive.
pub fn parse_cell_label(label: &str) -> Option<(usize, usize)> {
    let mut chars = label.chars();
    let row_letter = chars.next()?.to_ascii_uppercase();
    if !row_letter.is_ascii_uppercase() {
        return None;
    }
    let col: usize = chars.as_str().parse().ok()?;
    if col == 0 {
        return None;
    }
    Some(((row_letter as u8 - b'A') as usize, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
        assert_eq!(format_duration(Duration::from_millis(65_900)), "01:05");
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_cell_labels() {
        assert_eq!(cell_label(0, 0), "A1");
        assert_eq!(cell_label(1, 2), "B3");
        assert_eq!(parse_cell_label("b3"), Some((1, 2)));
        assert_eq!(parse_cell_label("E5"), Some((4, 4)));
        assert_eq!(parse_cell_label("A0"), None);
        assert_eq!(parse_cell_label("3B"), None);
        assert_eq!(parse_cell_label("B"), None);
        assert_eq!(parse_cell_label(""), None);
    }
}
