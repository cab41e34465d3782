// ABOUTME: Shared utility functions for AuditFlow
// ABOUTME: Log id generation and wall-clock label formatting

use chrono::Local;

/// Alphabet used for log entry ids
const LOG_ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Generate an opaque 9-character log entry id.
///
/// Ids are random, not sequential; collisions are unlikely but not ruled out.
pub fn generate_log_id() -> String {
    nanoid::nanoid!(9, &LOG_ID_ALPHABET)
}

/// Local wall-clock time with seconds, used as the log timestamp
pub fn wall_clock_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Local wall-clock time to the minute, used as a chart axis label
pub fn clock_label() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_log_id() {
        let id1 = generate_log_id();
        let id2 = generate_log_id();

        assert_eq!(id1.len(), 9);
        assert_eq!(id2.len(), 9);
        assert_ne!(id1, id2);
        assert!(id1
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_clock_formats() {
        let ts = wall_clock_timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.matches(':').count(), 2);

        let label = clock_label();
        assert_eq!(label.len(), 5);
        assert_eq!(label.matches(':').count(), 1);
    }
}
