//! Entity registry.
//!
//! Owns every enemy, item and exit of the current level. Iteration order is
//! insertion order, which is also the order enemies act in.

use serde::{Deserialize, Serialize};

use crate::game::types::{Enemy, Entity, EntityId, EntityKind, ItemKind, Position};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity at `pos` and returns its id. Does not check occupancy;
    /// use the placement sampler for that.
    pub fn insert(&mut self, pos: Position, kind: EntityKind) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity { id, pos, kind });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.entities.iter().any(|e| e.pos == pos)
    }

    /// All entities standing on `pos`. Enemies may overlap each other or items.
    pub fn at(&self, pos: Position) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.pos == pos)
    }

    /// First enemy (in registry order) standing on `pos`.
    pub fn enemy_at(&self, pos: Position) -> Option<(EntityId, Enemy)> {
        self.at(pos).find_map(|e| match e.kind {
            EntityKind::Enemy(enemy) => Some((e.id, enemy)),
            _ => None,
        })
    }

    pub fn item_at(&self, pos: Position) -> Option<(EntityId, ItemKind)> {
        self.at(pos).find_map(|e| match e.kind {
            EntityKind::Item { item } => Some((e.id, item)),
            _ => None,
        })
    }

    pub fn exit_at(&self, pos: Position) -> Option<EntityId> {
        self.at(pos).find(|e| e.is_exit()).map(|e| e.id)
    }

    /// Snapshot of enemy ids in acting order.
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.entities.iter().filter(|e| e.is_enemy()).map(|e| e.id).collect()
    }

    pub fn count_enemies(&self) -> usize {
        self.entities.iter().filter(|e| e.is_enemy()).count()
    }

    pub fn count_items(&self) -> usize {
        self.entities.iter().filter(|e| matches!(e.kind, EntityKind::Item { .. })).count()
    }

    pub fn count_exits(&self) -> usize {
        self.entities.iter().filter(|e| e.is_exit()).count()
    }

    /// Removes every enemy. Returns how many were removed.
    pub fn clear_enemies(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.is_enemy());
        before - self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> EntityKind {
        EntityKind::Enemy(Enemy { hp: 20, power: 10 })
    }

    #[test]
    fn insert_and_lookup_by_position() {
        let mut registry = EntityRegistry::new();
        let a = registry.insert(Position::new(1, 0), enemy());
        let b = registry.insert(Position::new(2, 2), EntityKind::Item { item: ItemKind::Coin });
        let c = registry.insert(Position::new(5, 5), EntityKind::Exit);

        assert_ne!(a, b);
        assert_eq!(registry.enemy_at(Position::new(1, 0)).map(|(id, _)| id), Some(a));
        assert_eq!(registry.item_at(Position::new(2, 2)), Some((b, ItemKind::Coin)));
        assert_eq!(registry.exit_at(Position::new(5, 5)), Some(c));
        assert!(registry.enemy_at(Position::new(2, 2)).is_none());
        assert!(registry.is_occupied(Position::new(5, 5)));
        assert!(!registry.is_occupied(Position::new(0, 0)));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut registry = EntityRegistry::new();
        let a = registry.insert(Position::new(1, 0), enemy());
        let b = registry.insert(Position::new(2, 0), enemy());
        let c = registry.insert(Position::new(3, 0), enemy());

        assert!(registry.remove(b).is_some());
        assert!(registry.remove(b).is_none());
        assert_eq!(registry.enemy_ids(), vec![a, c]);
    }

    #[test]
    fn clear_enemies_leaves_items_and_exit() {
        let mut registry = EntityRegistry::new();
        registry.insert(Position::new(1, 0), enemy());
        registry.insert(Position::new(2, 0), enemy());
        registry.insert(Position::new(3, 0), EntityKind::Item { item: ItemKind::Potion });
        registry.insert(Position::new(4, 0), EntityKind::Exit);

        assert_eq!(registry.clear_enemies(), 2);
        assert_eq!(registry.count_enemies(), 0);
        assert_eq!(registry.count_items(), 1);
        assert_eq!(registry.count_exits(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut registry = EntityRegistry::new();
        let a = registry.insert(Position::new(1, 0), enemy());
        registry.remove(a);
        let b = registry.insert(Position::new(1, 0), enemy());
        assert_ne!(a, b);
    }
}
