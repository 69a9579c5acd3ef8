//! Status lines for the `ape` binary, printed to stderr so that stdout
//! stays clean for equations, DOT output and shell snippets.
//!
//! Labels are right-aligned to 12 columns:
//!
//! ```text
//!   Validating /ape/sdox/products/dev/product.equation
//!        Order theme (pos 0) must be AFTER feature base (pos 1) but isn't.
//!      Skipped no product spec at /ape/featuremodel/.../product_spec.json
//! ```

use std::io::Write;

use console::Style;

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.bold().apply_to(label)
    );
}

/// A finished step, such as a written equation or a passing check (green).
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green(), label, message);
}

/// The file or product about to be processed (cyan).
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan(), label, message);
}

/// A check that was skipped because its input is missing (yellow).
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow(), label, message);
}

/// A violation found by a check (red).
pub fn status_error(label: &str, message: &str) {
    print_status(Style::new().red(), label, message);
}
