//! Terminal front end: stdin commands in, boards and status text out.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::driver::{CommandSource, Event};
use crate::engine::{Board, Side};

/// Reads one command per line from standard input.
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommandSource for StdinSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

const GAP: &str = "      ";

/// Both grids side by side with titles and a legend.
pub fn format_boards(player: &Board, computer: &Board) -> String {
    let width = player.render().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    out.push_str(&format!("{:<width$}{}{}\n", "Your grid", GAP, "Computer grid"));
    for (left, right) in player.render().zip(computer.render()) {
        out.push_str(&format!("{:<width$}{}{}\n", left, GAP, right));
    }
    out.push_str("Legend: S=Ship  X=Hit  o=Miss  .=Water");
    out
}

/// Text shown for one event.
pub fn format_event(event: &Event) -> String {
    match event {
        Event::Status(msg) => msg.clone(),
        Event::Rejected(msg) => format!("! {}", msg),
        Event::Boards { player, computer } => format_boards(player, computer),
        Event::GameOver { winner: Side::Player } => {
            "GAME OVER - you sank the whole computer fleet. Type `start` for a new game.".to_string()
        }
        Event::GameOver { winner: Side::Computer } => {
            "GAME OVER - your fleet is destroyed. Type `start` for a new game.".to_string()
        }
    }
}

/// Print events until the driver drops its sender.
pub async fn print_events(mut events: UnboundedReceiver<Event>) {
    while let Some(event) = events.recv().await {
        println!("{}\n", format_event(&event));
    }
}
