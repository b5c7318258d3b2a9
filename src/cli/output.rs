//! Output formatting and progress display for the CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    board::Board,
    search::{Decision, SearchProgress, SearchTask},
};

/// Create a spinner for a running search
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Drive a search task to completion, ticking a spinner between slices
pub fn run_with_spinner(mut task: SearchTask, label: &str) -> crate::Result<Decision> {
    let spinner = create_spinner(label);
    let decision = loop {
        match task.resume()? {
            SearchProgress::Pending => {
                spinner.set_message(format!(
                    "{label} ({} states)",
                    format_number(task.stats().states_sampled as usize)
                ));
                spinner.tick();
            }
            SearchProgress::Complete(decision) => break decision,
        }
    };
    spinner.finish_and_clear();
    Ok(decision)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Board with row and column indices
pub fn render_board(board: &Board) -> String {
    let side = board.side();
    let mut out = String::from("   ");
    for c in 0..side {
        out.push_str(&format!(" {c}"));
    }
    for (r, row) in board.to_string().lines().enumerate() {
        out.push_str(&format!("\n {r} "));
        for ch in row.chars() {
            out.push(' ');
            out.push(ch);
        }
    }
    out
}

/// Print a decision and its diagnostics
pub fn print_decision(decision: &Decision) {
    let candidates: Vec<String> = decision.candidates.iter().map(|c| c.to_string()).collect();
    print_kv("Chosen", &decision.chosen.to_string());
    print_kv("Candidates", &candidates.join(" "));
    print_kv("Score", &decision.score.to_string());
    print_kv(
        "States sampled",
        &format_number(decision.stats.states_sampled as usize),
    );
    print_kv(
        "Skipped",
        &format!(
            "{} by symmetry, {} by alpha-beta",
            format_number(decision.stats.symmetry_culled as usize),
            format_number(decision.stats.alpha_beta_cutoffs as usize)
        ),
    );
    print_kv("Max depth", &decision.stats.max_depth.to_string());
    print_kv(
        "Time",
        &format!(
            "{:.2?} ({:.0} states/s)",
            decision.stats.elapsed,
            decision.stats.states_per_sec()
        ),
    );
}
