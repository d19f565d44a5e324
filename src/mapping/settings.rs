//! # Settings File
//!
//! Line-oriented mapping persistence:
//!
//! ```text
//! Map: A, ButtonA
//! Map: Left, LeftStickLeft
//! Map: Space, TriggerRight
//! ```
//!
//! Loading is forgiving. Lines that do not parse, or that name an unknown
//! key or action, are skipped.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::action::LogicalAction;
use super::keys::KeyCode;
use crate::error::Result;

/// Prefix of every mapping line
pub const MAP_PREFIX: &str = "Map:";

/// Parses one settings line.
///
/// Whitespace is ignored anywhere in the line. Returns `None` for lines that
/// are not mappings, have the wrong shape, name an unknown key or action, or
/// bind a key to `ButtonNone`.
///
/// # Examples
///
/// ```
/// use keypad_bridge::mapping::action::{Button, LogicalAction};
/// use keypad_bridge::mapping::settings::parse_line;
///
/// let (key, action) = parse_line("Map: A, ButtonA").unwrap();
/// assert_eq!(key.code(), 65);
/// assert_eq!(action, LogicalAction::DiscreteButton(Button::A));
///
/// assert!(parse_line("Map: A, Jump").is_none());
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<(KeyCode, LogicalAction)> {
    parse_binding(line).filter(|(_, action)| !action.is_none())
}

/// Like [`parse_line`], but keeps `ButtonNone` bindings.
///
/// Used for interactive input, where binding a key to `ButtonNone` unbinds it.
#[must_use]
pub fn parse_binding(line: &str) -> Option<(KeyCode, LogicalAction)> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let body = compact.strip_prefix(MAP_PREFIX)?;

    let mut parts = body.split(',');
    let (key, action) = match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(action), None) => (key, action),
        _ => return None,
    };

    let key = key.parse::<KeyCode>().ok()?;
    let action = action.parse::<LogicalAction>().ok()?;
    Some((key, action))
}

/// Parses a whole settings file, skipping invalid lines.
#[must_use]
pub fn parse_mappings(contents: &str) -> Vec<(KeyCode, LogicalAction)> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                debug!("Skipping settings line {}: {:?}", index + 1, line);
            }
            parsed
        })
        .collect()
}

/// Formats mappings as settings lines, one per entry.
#[must_use]
pub fn format_mappings(entries: &[(KeyCode, LogicalAction)]) -> String {
    entries
        .iter()
        .map(|(key, action)| format!("{} {}, {}\n", MAP_PREFIX, key, action))
        .collect()
}

/// Reads and parses a settings file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read. Invalid lines inside a
/// readable file are not errors.
pub fn read_mappings<P: AsRef<Path>>(path: P) -> Result<Vec<(KeyCode, LogicalAction)>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_mappings(&contents))
}

/// Writes mappings to a settings file, replacing its contents.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_mappings<P: AsRef<Path>>(path: P, entries: &[(KeyCode, LogicalAction)]) -> Result<()> {
    fs::write(path, format_mappings(entries))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::action::{Axis, AxisSign, Button, TriggerSide};
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_line_with_spacing() {
        assert_eq!(
            parse_line("  Map :  Left ,LeftStickLeft "),
            Some((
                KeyCode::new(37),
                LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Negative)
            ))
        );
    }

    #[test]
    fn test_parse_line_rejects_wrong_shape() {
        assert_eq!(parse_line("Map: A"), None);
        assert_eq!(parse_line("Map: A, ButtonA, ButtonB"), None);
        assert_eq!(parse_line("Bind: A, ButtonA"), None);
        assert_eq!(parse_line("A, ButtonA"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_parse_line_rejects_unknown_names() {
        assert_eq!(parse_line("Map: Hyper, ButtonA"), None);
        assert_eq!(parse_line("Map: A, Jump"), None);
        assert_eq!(parse_line("Map: 300, ButtonA"), None);
    }

    #[test]
    fn test_parse_line_skips_button_none() {
        assert_eq!(parse_line("Map: A, ButtonNone"), None);
        assert_eq!(
            parse_binding("Map: A, ButtonNone"),
            Some((KeyCode::new(65), LogicalAction::None))
        );
    }

    #[test]
    fn test_parse_mappings_skips_corrupt_lines() {
        let contents = "Map: A, ButtonA\n\
                        garbage\n\
                        Map: Space, TriggerRight\n\
                        Map: Q, NotAButton\n\
                        \n\
                        Map: D, DpadRight\r\n";
        let mappings = parse_mappings(contents);
        assert_eq!(
            mappings,
            vec![
                (KeyCode::new(65), LogicalAction::DiscreteButton(Button::A)),
                (KeyCode::new(32), LogicalAction::Trigger(TriggerSide::Right)),
                (KeyCode::new(68), LogicalAction::DiscreteButton(Button::DpadRight)),
            ]
        );
    }

    #[test]
    fn test_format_mappings() {
        let entries = vec![
            (KeyCode::new(13), LogicalAction::DiscreteButton(Button::Start)),
            (KeyCode::new(38), LogicalAction::AxisDirection(Axis::LeftStickY, AxisSign::Positive)),
        ];
        assert_eq!(
            format_mappings(&entries),
            "Map: Return, ButtonStart\nMap: Up, LeftStickUp\n"
        );
    }

    #[test]
    fn test_write_then_read_file() {
        let file = NamedTempFile::new().unwrap();
        let entries = vec![
            (KeyCode::new(0xC0), LogicalAction::DiscreteButton(Button::Back)),
            (KeyCode::new(0xA0), LogicalAction::Trigger(TriggerSide::Left)),
        ];

        write_mappings(file.path(), &entries).unwrap();
        assert_eq!(read_mappings(file.path()).unwrap(), entries);
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_mappings(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(crate::error::RemapError::Io(_))));
    }
}
