//! Terminal rendering for project listings, sync reports and detail views

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success line
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print a warning line to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an informational line
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Heading for a detail view or report
pub fn title(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// A listing section: heading with its size, then one name per line
pub fn section(title: &str, names: &[String]) {
    println!(
        "\n{} {}",
        style(title).bold().underlined(),
        style(format!("({})", names.len())).dim()
    );
    if names.is_empty() {
        println!("  {}", style("none").dim());
    }
    for name in names {
        println!("  {}", name);
    }
}

/// A project that could not be processed, with the reason
pub fn failure(name: &str, reason: &str) {
    eprintln!("{} {}: {}", style("✗").red().bold(), style(name).bold(), reason);
}

/// Aligned `key  value` rows
pub fn fields(rows: &[(&str, String)]) {
    for line in format_fields(rows) {
        println!("{}", line);
    }
}

fn format_fields(rows: &[(&str, String)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(key, value)| {
            let padded = format!("{:<width$}", key, width = width);
            format!("  {}  {}", style(padded).dim(), value)
        })
        .collect()
}

/// Spinner shown while waiting on the network
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .iter()
            .map(|line| console::strip_ansi_codes(line).into_owned())
            .collect()
    }

    #[test]
    fn test_fields_align_on_longest_key() {
        let rows = [
            ("Name", "hearth".to_string()),
            ("Local path", "/dev/hearth".to_string()),
            ("Size", "12 KB".to_string()),
        ];

        assert_eq!(
            plain(format_fields(&rows)),
            vec![
                "  Name        hearth",
                "  Local path  /dev/hearth",
                "  Size        12 KB",
            ]
        );
    }

    #[test]
    fn test_fields_empty() {
        assert!(format_fields(&[]).is_empty());
    }
}
