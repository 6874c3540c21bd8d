//! Boxed error report for build output

/// Inner width of the box
const BOX_WIDTH: usize = 66;

/// Render `title` and one bullet per entry inside a box
///
/// Entries longer than the box are truncated with `...`.
pub fn boxed_report<I, S>(title: &str, entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rule = "═".repeat(BOX_WIDTH);
    let mut out = Vec::new();
    out.push(format!("╔{}╗", rule));
    out.push(boxed_line(&format!("  ERROR: {}", title)));
    out.push(format!("╠{}╣", rule));
    for entry in entries {
        for line in entry.as_ref().lines() {
            out.push(boxed_line(&format!("  • {}", line)));
        }
    }
    out.push(format!("╚{}╝", rule));
    out.join("\n")
}

fn boxed_line(text: &str) -> String {
    let text = truncate(text, BOX_WIDTH);
    let pad = BOX_WIDTH - text.chars().count();
    format!("║{}{}║", text, " ".repeat(pad))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let report = boxed_report("Invalid display_buffer configuration", ["width: too small"]);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("ERROR: Invalid display_buffer configuration"));
        assert!(lines[3].contains("• width: too small"));

        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_long_lines_truncated() {
        let long = "x".repeat(200);
        let report = boxed_report("Too long", [long.as_str()]);
        let bullet = report.lines().nth(3).unwrap();
        assert!(bullet.ends_with("...║"));
        assert_eq!(bullet.chars().count(), BOX_WIDTH + 2);
    }
}
