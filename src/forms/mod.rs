pub mod categories;
pub mod items;
pub mod restaurants;

/// Collapse inner whitespace runs, trim the ends and strip control
/// characters from single-line user input.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize multi-line user input line by line, trimming blank lines from
/// both ends and collapsing runs of blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Spice \t Garden  "), "Spice Garden");
    }

    #[test]
    fn sanitize_multiline_text_trims_blank_lines() {
        assert_eq!(
            sanitize_multiline_text("\n\n First line.\n\n\n Second line. \n\n"),
            "First line.\n\nSecond line."
        );
    }
}
