//! Item pickup.

use crate::config::GameConfig;
use crate::game::dungeon::Dungeon;
use crate::game::error::GameResult;
use crate::game::events::GameEvent;
use crate::game::systems::movement::target_cell;
use crate::game::types::{CommandKind, Direction, ItemKind, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    NoTarget,
    Collected(ItemKind),
}

/// Collect the item on the adjacent cell in `direction` and apply it right away.
pub fn pickup(
    player: &mut Player,
    dungeon: &mut Dungeon,
    direction: Direction,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> GameResult<PickupOutcome> {
    let target = target_cell(&dungeon.grid, player.pos, direction);

    let Some((id, item)) = dungeon.entities.item_at(target) else {
        events.push(GameEvent::NoTarget { command: CommandKind::Pickup, target });
        return Ok(PickupOutcome::NoTarget);
    };

    match item {
        ItemKind::Coin => player.coins = player.coins.saturating_add(config.coin_value),
        ItemKind::Potion => {
            player.heal(config.potion_heal, config.player_max_hp);
        }
    }
    dungeon.entities.remove(id);
    events.push(GameEvent::ItemCollected { item, pos: target });
    Ok(PickupOutcome::Collected(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Enemy, EntityKind, Position};

    #[test]
    fn potion_heal_is_clamped() {
        let config = GameConfig::default();
        let mut dungeon = Dungeon::empty(1, 10);
        dungeon.entities.insert(Position::new(1, 0), EntityKind::Item { item: ItemKind::Potion });
        let mut player = Player::new(100);
        player.hp = 90;
        let mut events = Vec::new();

        let outcome = pickup(&mut player, &mut dungeon, Direction::Right, &config, &mut events).unwrap();

        assert_eq!(outcome, PickupOutcome::Collected(ItemKind::Potion));
        assert_eq!(player.hp, 100);
        assert!(dungeon.entities.is_empty());
    }

    #[test]
    fn coin_adds_ten() {
        let config = GameConfig::default();
        let mut dungeon = Dungeon::empty(1, 10);
        dungeon.entities.insert(Position::new(0, 1), EntityKind::Item { item: ItemKind::Coin });
        let mut player = Player::new(100);
        let mut events = Vec::new();

        pickup(&mut player, &mut dungeon, Direction::Down, &config, &mut events).unwrap();

        assert_eq!(player.coins, 10);
        assert_eq!(events, vec![GameEvent::ItemCollected { item: ItemKind::Coin, pos: Position::new(0, 1) }]);
    }

    #[test]
    fn enemies_cannot_be_picked_up() {
        let config = GameConfig::default();
        let mut dungeon = Dungeon::empty(1, 10);
        dungeon.entities.insert(Position::new(1, 0), EntityKind::Enemy(Enemy { hp: 20, power: 10 }));
        let mut player = Player::new(100);
        let mut events = Vec::new();

        let outcome = pickup(&mut player, &mut dungeon, Direction::Right, &config, &mut events).unwrap();

        assert_eq!(outcome, PickupOutcome::NoTarget);
        assert_eq!(dungeon.entities.count_enemies(), 1);
    }
}
