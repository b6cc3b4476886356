//! Player attacks.

use crate::config::GameConfig;
use crate::game::dungeon::Dungeon;
use crate::game::error::GameResult;
use crate::game::events::{Combatant, GameEvent};
use crate::game::systems::movement::target_cell;
use crate::game::types::{CommandKind, Direction, EntityId, EntityKind, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    NoTarget,
    Hit { enemy: EntityId, remaining_hp: u32 },
    Killed { enemy: EntityId },
}

/// Strike the adjacent cell in `direction`. The player does not move.
/// A killed enemy is removed and pays out the kill reward.
pub fn attack(
    player: &mut Player,
    dungeon: &mut Dungeon,
    direction: Direction,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> GameResult<AttackOutcome> {
    let target = target_cell(&dungeon.grid, player.pos, direction);

    let Some((id, _)) = dungeon.entities.enemy_at(target) else {
        events.push(GameEvent::NoTarget { command: CommandKind::Attack, target });
        return Ok(AttackOutcome::NoTarget);
    };

    let mut remaining_hp = 0;
    if let Some(entity) = dungeon.entities.get_mut(id) {
        if let EntityKind::Enemy(enemy) = &mut entity.kind {
            enemy.hp = enemy.hp.saturating_sub(config.player_attack_power);
            remaining_hp = enemy.hp;
        }
    }
    events.push(GameEvent::DamageDealt {
        attacker: Combatant::Player,
        defender: Combatant::Enemy(id),
        amount: config.player_attack_power,
        remaining_hp,
    });

    if remaining_hp > 0 {
        return Ok(AttackOutcome::Hit { enemy: id, remaining_hp });
    }

    dungeon.entities.remove(id);
    player.coins = player.coins.saturating_add(config.enemy_kill_reward);
    events.push(GameEvent::EntityDefeated {
        entity: id,
        pos: target,
        reward: config.enemy_kill_reward,
    });
    Ok(AttackOutcome::Killed { enemy: id })
}
