use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Player spawn cell. Never a wall.
    pub const SPAWN: Position = Position { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    pub fn chebyshev(self, other: Position) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "right" | "r" => Ok(Direction::Right),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            other => Err(GameError::parse(format!("unknown direction `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Floor,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Move,
    Attack,
    Pickup,
    Dash,
}

impl CommandKind {
    /// Kinds every new player can queue.
    pub const STARTER: [CommandKind; 3] = [CommandKind::Move, CommandKind::Attack, CommandKind::Pickup];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Move => "move",
            CommandKind::Attack => "attack",
            CommandKind::Pickup => "pickup",
            CommandKind::Dash => "dash",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(CommandKind::Move),
            "attack" => Ok(CommandKind::Attack),
            "pickup" => Ok(CommandKind::Pickup),
            "dash" => Ok(CommandKind::Dash),
            other => Err(GameError::parse(format!("unknown command `{other}`"))),
        }
    }
}

/// A queued player command. Dash is a move applied twice in the same turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "lowercase")]
pub enum Command {
    Move(Direction),
    Attack(Direction),
    Pickup(Direction),
    Dash(Direction),
}

impl Command {
    pub fn new(kind: CommandKind, direction: Direction) -> Self {
        match kind {
            CommandKind::Move => Command::Move(direction),
            CommandKind::Attack => Command::Attack(direction),
            CommandKind::Pickup => Command::Pickup(direction),
            CommandKind::Dash => Command::Dash(direction),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Move(_) => CommandKind::Move,
            Command::Attack(_) => CommandKind::Attack,
            Command::Pickup(_) => CommandKind::Pickup,
            Command::Dash(_) => CommandKind::Dash,
        }
    }

    pub fn direction(&self) -> Direction {
        match *self {
            Command::Move(d) | Command::Attack(d) | Command::Pickup(d) | Command::Dash(d) => d,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.direction())
    }
}

/// Parses `"<kind> <direction>"`, e.g. `"attack left"`.
impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(kind), Some(direction), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(GameError::parse(format!("expected `<command> <direction>`, got `{}`", s.trim())));
        };
        Ok(Command::new(kind.parse()?, direction.parse()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Coin,
    Potion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub hp: u32,
    pub power: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityKind {
    Enemy(Enemy),
    Item { item: ItemKind },
    Exit,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Enemy(_) => "enemy",
            EntityKind::Item { item: ItemKind::Coin } => "coin",
            EntityKind::Item { item: ItemKind::Potion } => "potion",
            EntityKind::Exit => "exit",
        }
    }
}

/// Identifier handed out by the registry, unique within one level.
pub type EntityId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Position,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy(_))
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.kind, EntityKind::Exit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub hp: u32,
    pub coins: u32,
    /// Grows only.
    pub unlocked: BTreeSet<CommandKind>,
}

impl Player {
    pub fn new(hp: u32) -> Self {
        Self {
            pos: Position::SPAWN,
            hp,
            coins: 0,
            unlocked: CommandKind::STARTER.into_iter().collect(),
        }
    }

    pub fn can_use(&self, kind: CommandKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Heals by `amount`, never above `max_hp`. Returns the hit points actually gained.
    pub fn heal(&mut self, amount: u32, max_hp: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(max_hp);
        self.hp.saturating_sub(before)
    }

    /// Hit points bottom out at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

/// Effects granted from outside the game (shop purchases, rewards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalEffect {
    /// Restore hit points to the maximum.
    FullHeal,
    /// Remove every enemy of the current level.
    ClearEnemies,
}

impl fmt::Display for ExternalEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalEffect::FullHeal => f.write_str("full heal"),
            ExternalEffect::ClearEnemies => f.write_str("clear enemies"),
        }
    }
}

/// Shop products and what completing their purchase does to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    /// `extra-command`: unlocks dash.
    ExtraCommand,
    /// `health-potion`
    HealthPotion,
    /// `extinction-book`
    ExtinctionBook,
}

impl FromStr for Purchase {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "extra-command" => Ok(Purchase::ExtraCommand),
            "health-potion" => Ok(Purchase::HealthPotion),
            "extinction-book" => Ok(Purchase::ExtinctionBook),
            other => Err(GameError::parse(format!("unknown product `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!("move right".parse::<Command>(), Ok(Command::Move(Direction::Right)));
        assert_eq!("  Attack   UP ".parse::<Command>(), Ok(Command::Attack(Direction::Up)));
        assert_eq!("dash l".parse::<Command>(), Ok(Command::Dash(Direction::Left)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!("move".parse::<Command>().is_err());
        assert!("jump up".parse::<Command>().is_err());
        assert!("move up now".parse::<Command>().is_err());
        assert!("move sideways".parse::<Command>().is_err());
    }

    #[test]
    fn chebyshev_counts_diagonals_as_adjacent() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.chebyshev(Position::new(4, 4)), 1);
        assert_eq!(origin.chebyshev(Position::new(3, 3)), 0);
        assert_eq!(origin.chebyshev(Position::new(1, 4)), 2);
    }

    #[test]
    fn heal_is_clamped_to_max() {
        let mut player = Player::new(100);
        player.hp = 90;
        assert_eq!(player.heal(20, 100), 10);
        assert_eq!(player.hp, 100);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut player = Player::new(100);
        player.hp = 5;
        player.take_damage(10);
        assert_eq!(player.hp, 0);
        assert!(player.is_defeated());
    }

    #[test]
    fn new_player_has_starter_commands_only() {
        let player = Player::new(100);
        assert!(player.can_use(CommandKind::Move));
        assert!(player.can_use(CommandKind::Attack));
        assert!(player.can_use(CommandKind::Pickup));
        assert!(!player.can_use(CommandKind::Dash));
    }

    #[test]
    fn command_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Command::Dash(Direction::Down)).unwrap();
        assert_eq!(json, r#"{"kind":"dash","direction":"down"}"#);
    }

    #[test]
    fn purchase_ids_map_to_products() {
        assert_eq!("extra-command".parse::<Purchase>(), Ok(Purchase::ExtraCommand));
        assert_eq!("extinction-book".parse::<Purchase>(), Ok(Purchase::ExtinctionBook));
        assert!("gold-sword".parse::<Purchase>().is_err());
    }
}
