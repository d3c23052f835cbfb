//! Device records shared by both transports

use serde::Serialize;

/// One entry of a transport's device enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    pub status: String,
}

impl Device {
    /// Whether the debug-bridge protocol answers in this state
    pub fn is_bridge_reachable(&self) -> bool {
        matches!(
            self.status.trim().to_ascii_lowercase().as_str(),
            "device" | "recovery" | "sideload"
        )
    }
}

/// Output of a lenient line parser: accepted items plus the number of
/// non-blank lines that were dropped as malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> ParseReport<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for ParseReport<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}

/// Parse `serial<ws>status` lines; anything not exactly two fields is skipped
pub(crate) fn parse_device_lines<'a>(lines: impl Iterator<Item = &'a str>) -> ParseReport<Device> {
    let mut report = ParseReport::default();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if let [serial, status] = parts.as_slice() {
            report.items.push(Device {
                serial: serial.to_string(),
                status: status.to_string(),
            });
        } else {
            report.skipped += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_lines_keeps_order() {
        let report = parse_device_lines("emulator-5554\tdevice\nR58M12ABCDE\tunauthorized".lines());
        assert_eq!(report.skipped, 0);
        assert_eq!(
            report.items,
            vec![
                Device {
                    serial: "emulator-5554".to_string(),
                    status: "device".to_string(),
                },
                Device {
                    serial: "R58M12ABCDE".to_string(),
                    status: "unauthorized".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_device_lines_skips_malformed() {
        let text = "abc\tdevice\n\n* daemon not running; starting now at tcp:5037\nlonely\n";
        let report = parse_device_lines(text.lines());
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_bridge_reachable_statuses() {
        let device = |status: &str| Device {
            serial: "x".to_string(),
            status: status.to_string(),
        };
        assert!(device("device").is_bridge_reachable());
        assert!(device(" Recovery ").is_bridge_reachable());
        assert!(device("SIDELOAD").is_bridge_reachable());
        assert!(!device("unauthorized").is_bridge_reachable());
        assert!(!device("offline").is_bridge_reachable());
    }
}
