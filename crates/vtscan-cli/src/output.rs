//! Terminal output formatting.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use vtscan_core::results::view::{Emphasis, Line};
use vtscan_core::settings::Notice;

/// Apply a line's emphasis.
pub fn styled(line: &Line) -> ColoredString {
    let text = line.text.as_str();
    match line.emphasis {
        Emphasis::Plain => text.normal(),
        Emphasis::Title => text.bold(),
        Emphasis::Muted => text.dimmed(),
        Emphasis::Busy => text.blue(),
        Emphasis::Success => text.green().bold(),
        Emphasis::Danger => text.red().bold(),
    }
}

/// Print rendered screen lines, a blank line after the title.
pub fn print_lines(lines: &[Line]) {
    for line in lines {
        println!("{}", styled(line));
        if line.emphasis == Emphasis::Title {
            println!();
        }
    }
}

/// Print a settings notice the way an alert would read.
pub fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(msg) => println!("{} {}", "✓".green().bold(), msg),
        Notice::Error(msg) => eprintln!("{} {}", "✗".red().bold(), msg.red()),
    }
}

/// Spinner on stderr for the loading state.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
