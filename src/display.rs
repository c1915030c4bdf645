use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_solver::{BitBoard, Cell, HEIGHT, WIDTH};

/// Draws the board to the terminal, column numbers on top, one colored
/// tile per cell
pub fn draw(board: &BitBoard) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (1..=WIDTH).map(|column| format!("{} ", column)).collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.cell(row, column) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
            stdout.queue(PrintStyledContent(style(" ")))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
