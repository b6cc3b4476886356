//! Events and state snapshots pushed to the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::dungeon::Dungeon;
use crate::game::grid::Grid;
use crate::game::types::{Command, CommandKind, Entity, EntityId, ExternalEffect, ItemKind, Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    Player,
    Enemy(EntityId),
}

/// Something notable happened. Emitted in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CommandQueued { command: Command },
    PlayerMoved { from: Position, to: Position },
    /// The target cell is a wall; the player stays put.
    BlockedMovement { from: Position, target: Position },
    /// Attack or pickup aimed at a cell holding nothing of the right kind.
    NoTarget { command: CommandKind, target: Position },
    DamageDealt {
        attacker: Combatant,
        defender: Combatant,
        amount: u32,
        remaining_hp: u32,
    },
    EntityDefeated { entity: EntityId, pos: Position, reward: u32 },
    ItemCollected { item: ItemKind, pos: Position },
    LevelAdvanced { level: u32 },
    /// Hit points reached zero on `level`; the game restarts from level 1.
    PlayerDefeated { level: u32 },
    CommandUnlocked { kind: CommandKind },
    EffectApplied { effect: ExternalEffect },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::CommandQueued { command } => write!(f, "Queued `{command}`"),
            GameEvent::PlayerMoved { from, to } => write!(f, "Moved from {from} to {to}"),
            GameEvent::BlockedMovement { target, .. } => write!(f, "A wall blocks the way at {target}"),
            GameEvent::NoTarget { command: CommandKind::Pickup, target } => write!(f, "No item at {target}"),
            GameEvent::NoTarget { target, .. } => write!(f, "No enemy at {target}"),
            GameEvent::DamageDealt { attacker: Combatant::Player, amount, remaining_hp, .. } => {
                write!(f, "Dealt {amount} damage, enemy hp: {remaining_hp}")
            }
            GameEvent::DamageDealt { amount, remaining_hp, .. } => {
                write!(f, "Enemy attack! Took {amount} damage, hp: {remaining_hp}")
            }
            GameEvent::EntityDefeated { reward, .. } => write!(f, "Enemy defeated, earned {reward} coins"),
            GameEvent::ItemCollected { item: ItemKind::Coin, .. } => write!(f, "Picked up a coin"),
            GameEvent::ItemCollected { item: ItemKind::Potion, .. } => write!(f, "Drank a potion"),
            GameEvent::LevelAdvanced { level } => write!(f, "Advanced to level {level}"),
            GameEvent::PlayerDefeated { level } => write!(f, "Game over on level {level}"),
            GameEvent::CommandUnlocked { kind } => write!(f, "Command `{kind}` unlocked"),
            GameEvent::EffectApplied { effect } => write!(f, "Applied {effect}"),
        }
    }
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Turns executed since the session started.
    pub turn: u64,
    pub level: u32,
    pub grid: Grid,
    pub entities: Vec<Entity>,
    pub player: Player,
}

impl Snapshot {
    pub fn capture(turn: u64, dungeon: &Dungeon, player: &Player) -> Self {
        Self {
            turn,
            level: dungeon.level,
            grid: dungeon.grid.clone(),
            entities: dungeon.entities.as_slice().to_vec(),
            player: player.clone(),
        }
    }
}
