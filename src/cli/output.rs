use console::style;
use std::fmt::Display;

/// Centralized output formatting utilities for consistent CLI presentation
pub struct Output;

impl Output {
    /// Print a success message with checkmark
    pub fn success<T: Display>(message: T) {
        println!("{} {}", style("✓").green(), message);
    }

    /// Print an error message with X mark
    pub fn error<T: Display>(message: T) {
        println!("{} {}", style("✗").red(), message);
    }

    /// Print a warning message
    pub fn warning<T: Display>(message: T) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    /// Print an info message
    pub fn info<T: Display>(message: T) {
        println!("{} {}", style("ℹ").cyan(), message);
    }

    /// Print a sub-item with arrow prefix
    pub fn sub_item<T: Display>(message: T) {
        println!("  {} {}", style("→").dim(), message);
    }

    /// Print a bullet point
    pub fn bullet<T: Display>(message: T) {
        println!("  {} {}", style("•").dim(), message);
    }

    /// Print a section header
    pub fn section<T: Display>(title: T) {
        println!("\n{}", style(title).bold().underlined());
    }

    /// Print a tip/suggestion
    pub fn tip<T: Display>(message: T) {
        println!("{} {}", style("TIP:").cyan(), style(message).dim());
    }

    /// Print a numbered item
    pub fn numbered_item<T: Display>(number: usize, message: T) {
        println!("  {}. {}", style(number).cyan(), message);
    }

    /// Print one stack of the presentation chain
    pub fn stack_info(
        label: &str,
        style_name: &str,
        back_stack: &[String],
        is_active: bool,
    ) {
        let marker = if is_active {
            style("●").green().to_string()
        } else {
            style("○").dim().to_string()
        };
        println!("{} {} {}", marker, style(label).bold(), style(format!("({style_name})")).dim());

        if back_stack.is_empty() {
            Self::sub_item(style("(empty)").dim());
        }
        for (depth, screen) in back_stack.iter().enumerate() {
            Self::sub_item(format!("{depth}: {}", style(screen).cyan()));
        }
    }
}
