//! Event-driven game loop.
//!
//! A single task alternates between the next input line and the paced
//! computer reply. Every command mutates the [`GameSession`] synchronously
//! and publishes [`Event`]s for the display layer to consume.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Sleep;

use crate::command::{Command, HELP};
use crate::config::Settings;
use crate::engine::{AttackReport, Board, GameError, GameSession, Phase, Side};
use crate::snapshot::{self, SaveError};
use crate::storage::SnapshotStore;

/// Source of raw input lines, one command per line.
#[async_trait::async_trait]
pub trait CommandSource: Send {
    /// Next line, or `None` once input is exhausted.
    async fn next_line(&mut self) -> anyhow::Result<Option<String>>;
}

/// Fixed list of lines, handed out in order, optionally spaced out like a
/// human typing.
pub struct ScriptedSource {
    lines: std::collections::VecDeque<String>,
    pause: Duration,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            pause: Duration::ZERO,
        }
    }

    /// Wait `pause` before handing out each line.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }
}

#[async_trait::async_trait]
impl CommandSource for ScriptedSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        if self.pause.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.pause).await;
        }
        Ok(self.lines.pop_front())
    }
}

/// Outbound notifications for the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Advisory text such as "B3 was a hit!".
    Status(String),
    /// A rejected command; the session is unchanged.
    Rejected(String),
    /// Player board and the masked computer board after a change.
    Boards { player: Board, computer: Board },
    GameOver { winner: Side },
}

/// One-shot timer pacing the computer's reply. Dropping or cancelling it
/// discards the pending reply.
#[derive(Default)]
pub struct ReplyTimer {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl ReplyTimer {
    pub fn arm(&mut self, delay: Duration) {
        self.sleep = Some(Box::pin(tokio::time::sleep(delay)));
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    /// Resolves when the armed delay elapses; never resolves while disarmed.
    pub async fn fired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => future::pending().await,
        }
    }
}

pub struct GameDriver<S: SnapshotStore> {
    session: GameSession,
    rng: SmallRng,
    store: S,
    settings: Settings,
    timer: ReplyTimer,
    events: UnboundedSender<Event>,
}

impl<S: SnapshotStore> GameDriver<S> {
    pub fn new(settings: Settings, store: S, events: UnboundedSender<Event>) -> Result<Self, GameError> {
        let mut rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let session = GameSession::new(&mut rng)?;
        Ok(Self {
            session,
            rng,
            store,
            settings,
            timer: ReplyTimer::default(),
            events,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A computer reply is scheduled and has not fired yet.
    pub fn reply_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Process input until `quit` or the source runs dry.
    pub async fn run(&mut self, source: &mut dyn CommandSource) -> anyhow::Result<()> {
        self.publish_boards();
        self.emit(Event::Status(HELP.to_string()));
        loop {
            tokio::select! {
                biased;
                _ = self.timer.fired() => self.computer_reply(),
                line = source.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<Command>() {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.handle(command),
                        Err(msg) => self.emit(Event::Rejected(msg)),
                    }
                }
            }
        }
        log::debug!("game loop finished");
        Ok(())
    }

    /// Apply one command. `Quit` is handled by [`run`](Self::run).
    pub fn handle(&mut self, command: Command) {
        log::debug!("command {:?}", command);
        match command {
            Command::Place {
                kind,
                start,
                orientation,
            } => match self.session.place_ship(kind, start, orientation) {
                Ok(report) => {
                    self.emit(Event::Status(report.to_string()));
                    self.publish_boards();
                }
                Err(e) => self.reject(e),
            },
            Command::AutoPlace => match self.session.auto_place(&mut self.rng) {
                Ok(reports) => {
                    for report in reports {
                        self.emit(Event::Status(report.to_string()));
                    }
                    self.publish_boards();
                }
                Err(e) => self.reject(e),
            },
            Command::Start if self.session.is_over() => self.new_game(),
            Command::Start => match self.session.start(&mut self.rng) {
                Ok(report) => {
                    self.announce(report);
                    if !self.session.is_over() {
                        self.your_turn();
                    }
                }
                Err(e) => self.reject(e),
            },
            Command::NewGame => self.new_game(),
            Command::Attack(coord) => match self.session.player_attack(coord) {
                Ok(report) => {
                    self.announce(report);
                    self.schedule_reply();
                }
                Err(e) => self.reject(e),
            },
            Command::Save => {
                let result = snapshot::save_game(
                    &mut self.store,
                    &self.settings.save_key,
                    self.settings.format,
                    &self.session,
                );
                match result {
                    Ok(()) => self.emit(Event::Status("Your game was successfully saved!".into())),
                    Err(e) => self.reject_save(e),
                }
            }
            Command::Load => {
                match snapshot::load_game(&self.store, &self.settings.save_key, self.settings.format) {
                    Ok(session) => {
                        self.timer.cancel();
                        self.session = session;
                        self.emit(Event::Status("Your game was successfully loaded!".into()));
                        self.publish_boards();
                        self.schedule_reply();
                    }
                    Err(e) => self.reject_save(e),
                }
            }
            Command::ClearSave => match snapshot::clear_save(&mut self.store, &self.settings.save_key) {
                Ok(()) => {
                    self.emit(Event::Status(
                        "Your save game data was successfully cleared!".into(),
                    ));
                    self.new_game();
                }
                Err(e) => self.reject_save(e),
            },
            Command::Show => self.publish_boards(),
            Command::Help => self.emit(Event::Status(HELP.to_string())),
            Command::Quit => {}
        }
    }

    /// Fire the computer's paced reply now.
    pub fn computer_reply(&mut self) {
        self.timer.cancel();
        match self.session.computer_turn(&mut self.rng) {
            Ok(report) => {
                self.announce(report);
                if !self.session.is_over() {
                    self.your_turn();
                }
            }
            Err(e) => log::warn!("computer reply skipped: {}", e),
        }
    }

    fn new_game(&mut self) {
        self.timer.cancel();
        match GameSession::new(&mut self.rng) {
            Ok(session) => {
                self.session = session;
                self.emit(Event::Status("New game. Place your ships.".into()));
                self.publish_boards();
            }
            Err(e) => self.reject(e),
        }
    }

    fn schedule_reply(&mut self) {
        if self.session.phase() == (Phase::InProgress { turn: Side::Computer }) {
            self.timer.arm(self.settings.reply_delay);
        }
    }

    fn announce(&mut self, report: AttackReport) {
        self.emit(Event::Status(report.to_string()));
        self.publish_boards();
        if let Some(winner) = report.winner {
            self.emit(Event::GameOver { winner });
        }
    }

    fn your_turn(&self) {
        self.emit(Event::Status(
            "It is now your turn. Fire at the computer grid with `attack <coord>`.".into(),
        ));
    }

    fn reject(&self, e: GameError) {
        self.emit(Event::Rejected(e.to_string()));
    }

    fn reject_save(&self, e: SaveError) {
        self.emit(Event::Rejected(e.to_string()));
    }

    fn publish_boards(&self) {
        self.emit(Event::Boards {
            player: self.session.player_board().clone(),
            computer: self.session.computer_view(),
        });
    }

    fn emit(&self, event: Event) {
        // A closed display is not fatal.
        let _ = self.events.send(event);
    }
}
