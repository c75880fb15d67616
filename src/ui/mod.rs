// Wed Oct 21 2026 - Alex

pub mod banner;
pub mod cli;
pub mod progress;
pub mod table;

pub use banner::Banner;
pub use cli::{Args, Command, CommandHandler};
pub use progress::ProgressManager;
pub use table::BatchTable;

use colored::Colorize;

pub fn print_info(message: &str) {
    println!("{} {}", "[*]".cyan(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "[+]".green(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "[!]".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[!]".red(), message);
}
