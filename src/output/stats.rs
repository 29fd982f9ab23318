//! Statistics reporting.

use console::style;

use crate::download::{Outcome, Stats};

/// Print the end-of-run totals.
pub fn print_summary(total_posts: u64, stats: &Stats) {
    println!();
    println!("total posts: {}", total_posts);
    println!("new files: {}", style(stats.count(Outcome::New)).green());
    println!("cached files: {}", style(stats.count(Outcome::Cached)).yellow());
    println!("failed files: {}", style(stats.count(Outcome::Failed)).red());
}
