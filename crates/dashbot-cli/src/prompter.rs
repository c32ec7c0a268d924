//! Terminal implementation of [`ScanPrompter`]

use dashbot::ScanPrompter;
use std::io::{self, BufRead, Write};

pub struct CliPrompter;

impl ScanPrompter for CliPrompter {
    fn prompt_continue(&self, message: &str) {
        print!("{}", message);
        io::stdout().flush().ok();
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok();
    }

    fn display_message(&self, message: &str) {
        println!("{}", message);
    }
}
