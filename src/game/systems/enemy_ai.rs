//! Enemy turn.
//!
//! Each enemy takes one greedy step toward the player on a randomly chosen axis,
//! then hits the player if it ends up within one cell (diagonals included).

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::game::dungeon::Dungeon;
use crate::game::events::{Combatant, GameEvent};
use crate::game::types::{EntityKind, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyTurnOutcome {
    /// Some hit in this pass brought the player to zero hit points.
    pub player_defeated: bool,
}

/// Run one pass over every enemy, in registry order.
///
/// The axis is picked by a coin flip even when the enemy is already aligned on
/// it, in which case the enemy stays put this turn. Enemies ignore each other
/// and may share cells with other entities.
pub fn run_enemy_turn<R: Rng>(
    player: &mut Player,
    dungeon: &mut Dungeon,
    config: &GameConfig,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> EnemyTurnOutcome {
    let Dungeon { grid, entities, .. } = dungeon;
    let mut outcome = EnemyTurnOutcome::default();

    for id in entities.enemy_ids() {
        let Some(entity) = entities.get_mut(id) else { continue };
        let EntityKind::Enemy(enemy) = entity.kind else { continue };

        let dx = (player.pos.x as i64 - entity.pos.x as i64).signum();
        let dy = (player.pos.y as i64 - entity.pos.y as i64).signum();
        let (step_x, step_y) = if rng.random_bool(config.horizontal_step_probability) {
            (dx, 0)
        } else {
            (0, dy)
        };

        if (step_x, step_y) != (0, 0) {
            if let Some(next) = grid.offset(entity.pos, step_x, step_y) {
                if matches!(grid.is_wall(next), Ok(false)) {
                    debug!("[EnemyAI] Enemy {} moves {} -> {}", id, entity.pos, next);
                    entity.pos = next;
                }
            }
        }

        if entity.pos.chebyshev(player.pos) <= 1 {
            player.take_damage(enemy.power);
            events.push(GameEvent::DamageDealt {
                attacker: Combatant::Enemy(id),
                defender: Combatant::Player,
                amount: enemy.power,
                remaining_hp: player.hp,
            });
            if player.is_defeated() {
                outcome.player_defeated = true;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Enemy, Position};
    use crate::tests::FixedRng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn enemy(power: u32) -> EntityKind {
        EntityKind::Enemy(Enemy { hp: 20, power })
    }

    #[test]
    fn distant_enemy_steps_toward_player_without_attacking() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let mut dungeon = Dungeon::empty(1, 10);
            let id = dungeon.entities.insert(Position::new(5, 5), enemy(10));
            let mut player = Player::new(100);
            let mut events = Vec::new();

            run_enemy_turn(&mut player, &mut dungeon, &config, &mut rng, &mut events);

            let pos = dungeon.entities.get(id).map(|e| e.pos);
            assert!(pos == Some(Position::new(4, 5)) || pos == Some(Position::new(5, 4)));
            assert_eq!(player.hp, 100);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn aligned_axis_choice_is_a_no_op() {
        // FixedRng(u64::MAX) always loses the coin flip, so the vertical axis is picked.
        let config = GameConfig::default();
        let mut dungeon = Dungeon::empty(1, 10);
        let id = dungeon.entities.insert(Position::new(5, 0), enemy(10));
        let mut player = Player::new(100);
        let mut events = Vec::new();

        run_enemy_turn(&mut player, &mut dungeon, &config, &mut FixedRng(u64::MAX), &mut events);

        assert_eq!(dungeon.entities.get(id).map(|e| e.pos), Some(Position::new(5, 0)));
    }

    #[test]
    fn walls_stop_enemies() {
        let config = GameConfig { horizontal_step_probability: 1.0, ..GameConfig::default() };
        let mut dungeon = Dungeon::empty(1, 10);
        dungeon.grid.set_wall(Position::new(4, 0)).unwrap();
        let id = dungeon.entities.insert(Position::new(5, 0), enemy(10));
        let mut player = Player::new(100);
        let mut events = Vec::new();

        run_enemy_turn(&mut player, &mut dungeon, &config, &mut StdRng::seed_from_u64(2), &mut events);

        assert_eq!(dungeon.entities.get(id).map(|e| e.pos), Some(Position::new(5, 0)));
    }

    #[test]
    fn diagonal_neighbour_attacks() {
        let config = GameConfig::default();
        let mut dungeon = Dungeon::empty(1, 10);
        dungeon.entities.insert(Position::new(1, 1), enemy(10));
        let mut player = Player::new(100);
        let mut events = Vec::new();

        let outcome = run_enemy_turn(&mut player, &mut dungeon, &config, &mut StdRng::seed_from_u64(3), &mut events);

        assert_eq!(player.hp, 90);
        assert!(!outcome.player_defeated);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn enemies_may_stack_on_the_same_cell() {
        let config = GameConfig { horizontal_step_probability: 1.0, ..GameConfig::default() };
        let mut dungeon = Dungeon::empty(1, 10);
        let a = dungeon.entities.insert(Position::new(3, 0), enemy(1));
        let b = dungeon.entities.insert(Position::new(4, 0), enemy(1));
        let mut player = Player::new(100);
        player.pos = Position::new(2, 0);
        let mut events = Vec::new();

        run_enemy_turn(&mut player, &mut dungeon, &config, &mut StdRng::seed_from_u64(4), &mut events);

        // a moves onto the player's cell, b moves onto a's old cell.
        assert_eq!(dungeon.entities.get(a).map(|e| e.pos), Some(Position::new(2, 0)));
        assert_eq!(dungeon.entities.get(b).map(|e| e.pos), Some(Position::new(3, 0)));
        assert_eq!(player.hp, 98);
    }

    #[test]
    fn every_enemy_still_acts_after_a_lethal_hit() {
        let config = GameConfig::default();
        let mut dungeon = Dungeon::empty(1, 10);
        dungeon.entities.insert(Position::new(1, 1), enemy(10));
        dungeon.entities.insert(Position::new(1, 1), enemy(10));
        let mut player = Player::new(100);
        player.hp = 5;
        let mut events = Vec::new();

        let outcome = run_enemy_turn(&mut player, &mut dungeon, &config, &mut StdRng::seed_from_u64(5), &mut events);

        assert!(outcome.player_defeated);
        assert_eq!(player.hp, 0);
        assert_eq!(events.len(), 2);
    }
}
