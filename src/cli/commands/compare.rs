//! Compare command - run every pruning combination on one position

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    cli::{
        commands::load_board,
        config::{CommonArgs, parse_player_token},
        output::{format_number, print_section, render_board, run_with_spinner},
    },
    search::{Decision, Search},
};

#[derive(Parser, Debug)]
#[command(about = "Compare pruning settings on one position")]
pub struct CompareArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Board layout, rows separated by '/' (e.g. "X../.O./...")
    #[arg(long)]
    pub board: String,

    /// Player to move (`x` or `o`)
    #[arg(long = "as")]
    pub playing_as: String,

    /// Marks in a line needed to win (defaults to the side length)
    #[arg(long)]
    pub win_length: Option<usize>,
}

const VARIANTS: [(&str, bool, bool); 4] = [
    ("alpha-beta + symmetry", true, true),
    ("alpha-beta only", true, false),
    ("symmetry only", false, true),
    ("exhaustive", false, false),
];

pub fn execute(args: CompareArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let player = parse_player_token(&args.playing_as, "--as")?;
    let board = load_board(&args.board, args.win_length, config.search.seed)?;

    print_section(&format!("{player} to move"));
    println!("{}\n", render_board(&board));

    let mut decisions: Vec<Decision> = Vec::with_capacity(VARIANTS.len());
    for (label, alpha_beta, symmetry) in VARIANTS {
        let search = config
            .search
            .clone()
            .with_alpha_beta_pruning(alpha_beta)
            .with_symmetry_pruning(symmetry);
        let task = Search::start(&board, player, search)?;
        decisions.push(run_with_spinner(task, label)?);
    }

    println!(
        "{:<22} {:>18} {:>11} {:>9} {:>9} {:>11}",
        "Pruning", "Score", "States", "Culled", "Cutoffs", "Time"
    );
    for ((label, _, _), decision) in VARIANTS.iter().zip(&decisions) {
        println!(
            "{:<22} {:>18} {:>11} {:>9} {:>9} {:>11}",
            label,
            decision.score.to_string(),
            format_number(decision.stats.states_sampled as usize),
            format_number(decision.stats.symmetry_culled as usize),
            format_number(decision.stats.alpha_beta_cutoffs as usize),
            format!("{:.2?}", decision.stats.elapsed),
        );
    }

    let reference = &decisions[0];
    let candidates: Vec<String> = reference.candidates.iter().map(|c| c.to_string()).collect();
    println!("\nCandidates: {}", candidates.join(" "));

    let agree = decisions
        .iter()
        .all(|d| d.candidates == reference.candidates && d.score == reference.score);
    if !agree {
        for ((label, _, _), decision) in VARIANTS.iter().zip(&decisions) {
            println!("  {label}: {:?}", decision.candidates);
        }
        bail!("pruning settings disagree on the best moves");
    }
    println!("All pruning settings agree.");
    Ok(())
}
