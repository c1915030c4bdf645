use anyhow::Result;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connect4_solver::*;

mod display;

const AI_BUDGET: Duration = Duration::from_secs(5);

fn main() -> Result<()> {
    let mut board = BitBoard::new();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let mut ai_players = (false, false);

    // choose AI control of player 1
    loop {
        let mut buffer = String::new();
        print!("Is player 1 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.0 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // choose AI control of player 2
    loop {
        let mut buffer = String::new();
        print!("Is player 2 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.1 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // game loop
    loop {
        display::draw(&board).expect("Failed to draw board!");

        if board.turn_count() as usize == WIDTH * HEIGHT {
            println!("Draw!");
            break;
        }

        let player_one = board.player_one_to_move();
        let ai_turn = (player_one && ai_players.0) || (!player_one && ai_players.1);

        let column = if ai_turn {
            println!("AI is thinking...");
            stdout().flush().expect("Failed to flush to stdout!");

            // slow down play if both players are AI
            if ai_players == (true, true) {
                std::thread::sleep(Duration::new(3, 0));
            }

            let mut solver = Solver::new(board);
            let eval = solver.solve_with_timeout(AI_BUDGET);

            let player = if player_one { 1 } else { 2 };
            let opponent = if player_one { 2 } else { 1 };
            match eval.score {
                score if score > 0 => println!(
                    "Player {} can force a win in {} plies.",
                    player, eval.win_in
                ),
                score if score < 0 => println!(
                    "Player {} can force a win in {} plies.",
                    opponent, eval.win_in
                ),
                _ => println!("No forced win within the search horizon."),
            }

            match eval.column {
                Some(column) => {
                    println!("Best move: {}", column + 1);
                    column
                }
                None => {
                    println!("Draw!");
                    break;
                }
            }

        // human player
        } else {
            print!("Move input > ");
            stdout().flush().expect("Failed to flush to stdout!");
            let mut input_str = String::new();
            stdin.read_line(&mut input_str)?;

            match input_str.trim().parse::<usize>() {
                Err(_) => {
                    println!("Invalid number: {}", input_str.trim());
                    continue;
                }
                Ok(column_one_indexed @ 1..=WIDTH) => column_one_indexed - 1,
                Ok(column_one_indexed) => {
                    println!(
                        "Invalid move, column {} out of range. Columns must be between 1 and {}",
                        column_one_indexed, WIDTH
                    );
                    continue;
                }
            }
        };

        let winning_move = Solver::new(board).does_move_win(column);
        match board.apply_move(column) {
            Ok(next) => board = next,
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
        }

        if winning_move {
            display::draw(&board).expect("Failed to draw board!");
            if player_one {
                println!("Player 1 wins!");
            } else {
                println!("Player 2 wins!");
            }
            break;
        }
    }
    Ok(())
}
