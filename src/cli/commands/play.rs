//! Play command - interactive game in the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    Error,
    board::Coord,
    cli::{
        config::{CommonArgs, parse_computer_seats, parse_player_token},
        output::{print_section, render_board, run_with_spinner},
    },
    session::{GameSession, GameStatus, MoveValidity, Seat},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game against the computer")]
pub struct PlayArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Board side length
    #[arg(long)]
    pub side: Option<usize>,

    /// Marks in a line needed to win (defaults to the side length)
    #[arg(long)]
    pub win_length: Option<usize>,

    /// Which token moves first (`x` or `o`)
    #[arg(long)]
    pub first_player: Option<String>,

    /// Seats the computer plays: `x`, `o`, `both` or `none`
    #[arg(long)]
    pub computer: Option<String>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut config = args.common.resolve()?;
    if let Some(side) = args.side {
        config.side = side;
        config.win_length = side;
    }
    if let Some(win_length) = args.win_length {
        config.win_length = win_length;
    }
    if let Some(ref value) = args.first_player {
        config.first_player = parse_player_token(value, "--first-player")?;
    }
    if let Some(ref value) = args.computer {
        config.computer = parse_computer_seats(value)?;
    }

    let mut session = GameSession::new(config)?;
    print_section(&format!(
        "{0}x{0} board, {1} in a line wins",
        session.board().side(),
        session.board().win_length()
    ));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.status().is_over() {
        println!("\n{}\n", render_board(session.board()));
        let player = session.to_move();

        match session.seat(player) {
            Seat::Human => {
                print!("{player} to move (row col): ");
                io::stdout().flush()?;
                let Some(line) = lines.next().transpose()? else {
                    bail!("input closed before the game finished");
                };
                let coord: Coord = match line.parse() {
                    Ok(coord) => coord,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match session.play_human(coord) {
                    Ok(report) if report.validity == MoveValidity::SquareAlreadyOccupied => {
                        println!("{coord} was already taken.");
                    }
                    Ok(_) => {}
                    Err(err @ Error::OutOfBounds { .. }) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                }
            }
            Seat::Computer => {
                let task = session.start_computer_turn()?;
                let decision = run_with_spinner(task, &format!("{player} is thinking"))?;
                let report = session.apply_decision(&decision)?;
                println!(
                    "{player} plays {} ({}, {} states)",
                    report.coord, decision.score, decision.stats.states_sampled
                );
            }
        }
    }

    println!("\n{}\n", render_board(session.board()));
    match session.status() {
        GameStatus::Won(player) => println!("{player} wins."),
        GameStatus::Tie => println!("Tie."),
        GameStatus::Cheated(player) => {
            println!("{player} played on an occupied square and forfeits.")
        }
        GameStatus::InProgress => {}
    }
    Ok(())
}
