use colored::*;

/// Prints a user-facing warning to stderr unless quiet.
pub fn print_warning(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} {}", "⚠️".yellow(), message);
    }
}

/// Prints a user-facing success notice to stderr unless quiet. Kept off
/// stdout so piped document output stays clean.
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} {}", "✔".green(), message);
    }
}
