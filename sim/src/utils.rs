use anstyle::AnsiColor;

pub(crate) const GRN: anstyle::Style = AnsiColor::Green.on_default();
pub(crate) const GRNB: anstyle::Style = AnsiColor::Green.on_default().bold();
pub(crate) const GRAY: anstyle::Style = AnsiColor::BrightBlack.on_default();
pub(crate) const REDB: anstyle::Style = AnsiColor::Red.on_default().bold();
pub(crate) const CYAN: anstyle::Style = AnsiColor::Cyan.on_default();

/// Iterate over the data-carrying lines of a numeric text file.
///
/// Yields `(line_number, payload)` with line numbers starting at 1. Blank
/// lines and comment lines (`//` or `#`) are skipped; a trailing comment
/// after the payload is cut off.
pub(crate) fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.lines().enumerate().filter_map(|(i, line)| {
        let mut payload = line;
        if let Some(pos) = payload.find("//") {
            payload = &payload[..pos];
        }
        if let Some(pos) = payload.find('#') {
            payload = &payload[..pos];
        }
        let payload = payload.trim();
        if payload.is_empty() {
            None
        } else {
            Some((i + 1, payload))
        }
    })
}
