//! Decide command - search one position and report the move

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        commands::load_board,
        config::{CommonArgs, parse_player_token},
        output::{print_decision, print_section, render_board, run_with_spinner},
    },
    search::Search,
};

#[derive(Parser, Debug)]
#[command(about = "Choose a move for one position")]
pub struct DecideArgs {
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

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DecideArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let player = parse_player_token(&args.playing_as, "--as")?;
    let board = load_board(&args.board, args.win_length, config.search.seed)?;

    let task = Search::start(&board, player, config.search)?;
    if args.json {
        let decision = task.run_to_completion()?;
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    let decision = run_with_spinner(task, &format!("{player} is thinking"))?;
    print_section(&format!("{player} to move"));
    println!("{}\n", render_board(&board));
    print_decision(&decision);
    Ok(())
}
