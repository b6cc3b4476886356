//! Game session and turn executor.
//!
//! A [`GameSession`] owns everything one playthrough needs: the player, the
//! current dungeon, the progression counter, the command queue and the single
//! random generator every random decision draws from. A turn is one queued
//! command followed by one enemy pass, and always runs to completion.

use std::collections::VecDeque;

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::config::session::seed_from_env;
use crate::game::dungeon::{Dungeon, generate_dungeon};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{GameEvent, Snapshot};
use crate::game::observer::{GameObserver, NoopObserver};
use crate::game::progression::Progression;
use crate::game::systems::{MoveOutcome, attack, move_player, pickup, run_enemy_turn};
use crate::game::types::{Command, CommandKind, Direction, ExternalEffect, Player, Position, Purchase};

/// What a call to [`GameSession::run_all`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The queue was empty. Informational, not an error.
    NothingQueued,
    Completed { turns: usize },
}

/// Result of a single turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub command: Command,
    pub events: Vec<GameEvent>,
    pub level_advanced: bool,
    pub player_defeated: bool,
}

pub struct GameSession<R: Rng = StdRng, O: GameObserver = NoopObserver> {
    id: Uuid,
    config: GameConfig,
    rng: R,
    observer: O,
    player: Player,
    dungeon: Dungeon,
    progression: Progression,
    queue: VecDeque<Command>,
    turn: u64,
}

impl GameSession {
    /// New session without observer. See [`GameSession::with_observer`] for seeding.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_observer(config, NoopObserver)
    }

    /// Reproducible session: same seed, same command list, same game.
    pub fn seeded(config: GameConfig, seed: u64) -> GameResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed), NoopObserver)
    }
}

impl<O: GameObserver> GameSession<StdRng, O> {
    /// Seeded from `DUNGEON_SEED` when set, from the OS otherwise.
    pub fn with_observer(config: GameConfig, observer: O) -> GameResult<Self> {
        let rng = match seed_from_env() {
            Some(seed) => {
                info!("[GameSession] Using fixed seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng, observer)
    }
}

impl<R: Rng, O: GameObserver> GameSession<R, O> {
    /// Starts a fresh playthrough on a generated level 1.
    pub fn with_rng(config: GameConfig, mut rng: R, observer: O) -> GameResult<Self> {
        config.validate()?;
        let dungeon = generate_dungeon(1, &config, &mut rng)?;
        let player = Player::new(config.player_max_hp);
        Ok(Self::from_parts(config, dungeon, player, rng, observer))
    }

    /// Resumes from a given layout and player, e.g. a hand-built level.
    pub fn from_parts(config: GameConfig, mut dungeon: Dungeon, player: Player, rng: R, observer: O) -> Self {
        dungeon.level = dungeon.level.max(1);
        let id = Uuid::new_v4();
        info!("[GameSession] Created session {} on level {}", id, dungeon.level);
        Self {
            id,
            progression: Progression::at_level(dungeon.level),
            config,
            rng,
            observer,
            player,
            dungeon,
            queue: VecDeque::new(),
            turn: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Turns executed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn pending(&self) -> impl Iterator<Item = &Command> {
        self.queue.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        debug_assert_eq!(self.dungeon.level, self.progression.level(), "dungeon and progression disagree on level");
        Snapshot::capture(self.turn, &self.dungeon, &self.player)
    }

    /// Append a command to the queue. Locked kinds are refused and the queue is left as is.
    pub fn enqueue(&mut self, command: Command) -> GameResult<()> {
        if !self.player.can_use(command.kind()) {
            warn!("[GameSession] {} refused `{}`: command is locked", self.id, command);
            return Err(GameError::CommandLocked(command.kind()));
        }
        self.queue.push_back(command);
        self.emit(GameEvent::CommandQueued { command });
        Ok(())
    }

    /// Drop every command that has not started yet. Returns how many were dropped.
    pub fn cancel_pending(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            info!("[GameSession] {} cancelled {} pending command(s)", self.id, dropped);
        }
        dropped
    }

    /// Execute the whole queue, front to back.
    ///
    /// A fatal error stops the run and discards the rest of the queue.
    pub fn run_all(&mut self) -> GameResult<RunOutcome> {
        if self.queue.is_empty() {
            info!("[GameSession] {} has no commands to execute", self.id);
            return Ok(RunOutcome::NothingQueued);
        }

        let mut turns = 0;
        loop {
            match self.execute_next() {
                Ok(Some(_)) => turns += 1,
                Ok(None) => break,
                Err(err) => {
                    self.queue.clear();
                    return Err(err);
                }
            }
        }

        info!("[GameSession] {} ran {} turn(s), now on level {}", self.id, turns, self.level());
        Ok(RunOutcome::Completed { turns })
    }

    /// Pop and execute the next queued command, if any.
    pub fn execute_next(&mut self) -> GameResult<Option<TurnReport>> {
        match self.queue.pop_front() {
            Some(command) => self.execute_one(command).map(Some),
            None => Ok(None),
        }
    }

    /// One full turn: apply `command`, then let every enemy act.
    pub fn execute_one(&mut self, command: Command) -> GameResult<TurnReport> {
        if !self.player.can_use(command.kind()) {
            return Err(GameError::CommandLocked(command.kind()));
        }
        debug!("[GameSession] {} turn {}: {}", self.id, self.turn + 1, command);

        let level_before = self.level();
        let mut events = Vec::new();

        match command {
            Command::Move(direction) => self.step_player(direction, &mut events)?,
            Command::Dash(direction) => {
                self.step_player(direction, &mut events)?;
                self.step_player(direction, &mut events)?;
            }
            Command::Attack(direction) => {
                attack(&mut self.player, &mut self.dungeon, direction, &self.config, &mut events)?;
            }
            Command::Pickup(direction) => {
                pickup(&mut self.player, &mut self.dungeon, direction, &self.config, &mut events)?;
            }
        }
        self.turn += 1;
        let level_advanced = self.level() > level_before;
        let mut emitted = self.flush(events);
        self.publish_state();

        let mut events = Vec::new();
        let outcome = run_enemy_turn(
            &mut self.player,
            &mut self.dungeon,
            &self.config,
            &mut self.rng,
            &mut events,
        );
        // A reset that failed to regenerate earlier leaves the player at 0 hp; retry it.
        let defeated = outcome.player_defeated || self.player.is_defeated();
        let reset = if defeated { self.handle_defeat(&mut events) } else { Ok(()) };
        emitted.extend(self.flush(events));
        self.publish_state();
        reset?;

        Ok(TurnReport {
            command,
            events: emitted,
            level_advanced,
            player_defeated: defeated,
        })
    }

    /// Widen the set of queueable command kinds. Returns `false` if it was already unlocked.
    pub fn unlock_command(&mut self, kind: CommandKind) -> bool {
        if !self.player.unlocked.insert(kind) {
            debug!("[GameSession] {} `{}` already unlocked", self.id, kind);
            return false;
        }
        info!("[GameSession] {} unlocked `{}`", self.id, kind);
        self.emit(GameEvent::CommandUnlocked { kind });
        self.publish_state();
        true
    }

    /// Apply an effect granted from outside the game. Only call between turns.
    pub fn apply_external_effect(&mut self, effect: ExternalEffect) {
        match effect {
            ExternalEffect::FullHeal => self.player.hp = self.config.player_max_hp,
            ExternalEffect::ClearEnemies => {
                let removed = self.dungeon.entities.clear_enemies();
                debug!("[GameSession] {} removed {} enemies", self.id, removed);
            }
        }
        info!("[GameSession] {} applied {}", self.id, effect);
        self.emit(GameEvent::EffectApplied { effect });
        self.publish_state();
    }

    /// What a completed shop purchase does to the game.
    pub fn apply_purchase(&mut self, purchase: Purchase) {
        match purchase {
            Purchase::ExtraCommand => {
                self.unlock_command(CommandKind::Dash);
            }
            Purchase::HealthPotion => self.apply_external_effect(ExternalEffect::FullHeal),
            Purchase::ExtinctionBook => self.apply_external_effect(ExternalEffect::ClearEnemies),
        }
    }

    fn step_player(&mut self, direction: Direction, events: &mut Vec<GameEvent>) -> GameResult<()> {
        if move_player(&mut self.player, &self.dungeon, direction, events)? == MoveOutcome::LevelAdvanced {
            self.advance_level(events)?;
        }
        Ok(())
    }

    /// Exit reached: next level, fresh layout, player back on spawn. Hit points and coins carry over.
    fn advance_level(&mut self, events: &mut Vec<GameEvent>) -> GameResult<()> {
        let next = self.progression.level() + 1;
        self.dungeon = generate_dungeon(next, &self.config, &mut self.rng)?;
        self.progression.advance_level();
        self.player.pos = Position::SPAWN;
        info!("[GameSession] {} advanced to level {}", self.id, next);
        events.push(GameEvent::LevelAdvanced { level: next });
        Ok(())
    }

    /// Runs once the enemy pass is over: full hit points, level 1, fresh layout.
    ///
    /// Nothing changes until the new level exists, so a failed regeneration
    /// leaves the session `Active` with the player still at 0 hp.
    fn handle_defeat(&mut self, events: &mut Vec<GameEvent>) -> GameResult<()> {
        let dungeon = match generate_dungeon(1, &self.config, &mut self.rng) {
            Ok(dungeon) => dungeon,
            Err(err) => {
                error!("[GameSession] {} could not reset after defeat: {}", self.id, err);
                return Err(err);
            }
        };
        if self.progression.mark_defeated() {
            info!("[GameSession] {} player defeated on level {}", self.id, self.level());
            events.push(GameEvent::PlayerDefeated { level: self.level() });
        }
        self.dungeon = dungeon;
        self.progression.reset();
        self.player.hp = self.config.player_max_hp;
        self.player.pos = Position::SPAWN;
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        self.observer.on_event(&event);
    }

    fn flush(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        for event in &events {
            self.observer.on_event(event);
        }
        events
    }

    fn publish_state(&mut self) {
        let snapshot = self.snapshot();
        self.observer.on_state_changed(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::observer::EventBuffer;

    #[test]
    fn new_session_starts_on_level_one() {
        let session = GameSession::seeded(GameConfig::default(), 1).unwrap();
        assert_eq!(session.level(), 1);
        assert_eq!(session.player().hp, 100);
        assert_eq!(session.player().pos, Position::SPAWN);
        assert_eq!(session.dungeon().entities.len(), 9);
    }

    #[test]
    fn empty_run_is_informational() {
        let mut session = GameSession::seeded(GameConfig::default(), 2).unwrap();
        assert_eq!(session.run_all(), Ok(RunOutcome::NothingQueued));
        assert_eq!(session.turn(), 0);
    }

    #[test]
    fn dash_is_locked_until_unlocked() {
        let mut session = GameSession::seeded(GameConfig::default(), 3).unwrap();
        assert_eq!(
            session.enqueue(Command::Dash(Direction::Right)),
            Err(GameError::CommandLocked(CommandKind::Dash))
        );
        assert_eq!(session.pending_len(), 0);

        assert!(session.unlock_command(CommandKind::Dash));
        assert!(!session.unlock_command(CommandKind::Dash));
        assert!(session.enqueue(Command::Dash(Direction::Right)).is_ok());
        assert_eq!(session.pending_len(), 1);
    }

    #[test]
    fn run_all_drains_queue_in_order() {
        let mut session = GameSession::seeded(GameConfig::default(), 4).unwrap();
        for direction in [Direction::Up, Direction::Left, Direction::Up] {
            session.enqueue(Command::Move(direction)).unwrap();
        }
        assert_eq!(session.run_all(), Ok(RunOutcome::Completed { turns: 3 }));
        assert_eq!(session.pending_len(), 0);
        assert_eq!(session.turn(), 3);
    }

    #[test]
    fn observer_sees_two_snapshots_per_turn() {
        let rng = StdRng::seed_from_u64(5);
        let mut session = GameSession::with_rng(GameConfig::default(), rng, EventBuffer::new()).unwrap();
        session.enqueue(Command::Attack(Direction::Up)).unwrap();
        session.enqueue(Command::Attack(Direction::Left)).unwrap();
        session.run_all().unwrap();

        let snapshots: Vec<&Snapshot> = session.observer().snapshots().collect();
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[1].turn, 1);
        assert_eq!(snapshots[3].turn, 2);
        let events: Vec<&GameEvent> = session.observer().events().collect();
        assert!(matches!(events[0], GameEvent::CommandQueued { .. }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::NoTarget { .. })));
    }

    #[test]
    fn cancel_pending_empties_queue() {
        let mut session = GameSession::seeded(GameConfig::default(), 6).unwrap();
        session.enqueue(Command::Move(Direction::Down)).unwrap();
        session.enqueue(Command::Move(Direction::Down)).unwrap();
        assert_eq!(session.cancel_pending(), 2);
        assert_eq!(session.run_all(), Ok(RunOutcome::NothingQueued));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = GameConfig { grid_size: 0, ..GameConfig::default() };
        assert!(matches!(GameSession::seeded(config, 0), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn purchases_map_to_core_effects() {
        let mut session = GameSession::seeded(GameConfig::default(), 7).unwrap();
        session.apply_purchase(Purchase::ExtraCommand);
        assert!(session.player().can_use(CommandKind::Dash));

        session.apply_purchase(Purchase::ExtinctionBook);
        assert_eq!(session.dungeon().entities.count_enemies(), 0);
        assert_eq!(session.dungeon().entities.count_items(), 5);
        assert_eq!(session.dungeon().entities.count_exits(), 1);
    }
}
