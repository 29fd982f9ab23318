//! Console output utilities.

use console::style;

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print an unlabelled progress line.
pub fn print_status(message: &str) {
    println!("{}", message);
}

/// Print an unlabelled progress line to stderr.
pub fn print_status_err(message: &str) {
    eprintln!("{}", message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Saved Downloader                                  ║
║     Archive the media of your saved posts             ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(account: &str, feed_mode: &str, output_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Account: {}", account);
    println!("  Feed: {}", feed_mode);
    println!("  Directory: {}", output_dir);
    println!();
}
