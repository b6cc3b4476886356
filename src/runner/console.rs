//! Terminal renderer (demo).
//!
//! Subscribes to a session runner and prints the grid after every state change,
//! or one JSON object per update in `json` mode.

use actix::prelude::*;
use log::{error, info};

use crate::game::events::Snapshot;
use crate::game::types::{Cell, EntityKind, ItemKind};
use crate::runner::messages::SessionUpdate;

/// Render the grid, entities and player as text, one row per line.
pub fn render_grid(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for (y, row) in snapshot.grid.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            // Default symbol for the cell.
            let mut symbol = match cell {
                Cell::Wall => "██",
                Cell::Floor => "· ",
            };

            // Player first, then the first entity on the tile.
            if snapshot.player.pos.x == x && snapshot.player.pos.y == y {
                symbol = "@ ";
            } else if let Some(entity) = snapshot.entities.iter().find(|e| e.pos.x == x && e.pos.y == y) {
                symbol = match entity.kind {
                    EntityKind::Enemy(_) => "E ",
                    EntityKind::Item { item: ItemKind::Coin } => "$ ",
                    EntityKind::Item { item: ItemKind::Potion } => "! ",
                    EntityKind::Exit => "> ",
                };
            }

            out.push_str(&format!("{:<3}", symbol));
        }
        out.push('\n');
    }
    out
}

/// Print the player status line.
pub fn render_status(snapshot: &Snapshot) -> String {
    let unlocked: Vec<&str> = snapshot.player.unlocked.iter().map(|k| k.as_str()).collect();
    format!(
        "--- Turn {} | Level {} | HP {} | Coins {} | Commands: {} ---",
        snapshot.turn,
        snapshot.level,
        snapshot.player.hp,
        snapshot.player.coins,
        unlocked.join(", ")
    )
}

#[derive(Default)]
pub struct ConsoleRenderer {
    json: bool,
}

impl ConsoleRenderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json(&self, update: &SessionUpdate) {
        match serde_json::to_string(update) {
            Ok(line) => println!("{}", line),
            Err(err) => error!("[Console] Failed to serialize update: {}", err),
        }
    }
}

impl Actor for ConsoleRenderer {
    type Context = Context<Self>;
}

impl Handler<SessionUpdate> for ConsoleRenderer {
    type Result = ();

    fn handle(&mut self, msg: SessionUpdate, _: &mut Context<Self>) -> Self::Result {
        if self.json {
            self.print_json(&msg);
            return;
        }
        match msg {
            SessionUpdate::State(snapshot) => {
                println!("{}", render_status(&snapshot));
                println!("{}", render_grid(&snapshot));
            }
            SessionUpdate::Event(event) => info!("[Console] {}", event),
            SessionUpdate::RunFinished { turns } => info!("[Console] Run finished after {} turn(s)", turns),
            SessionUpdate::Failed { code, message } => error!("[Console] {}: {}", code, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dungeon::Dungeon;
    use crate::game::types::{Enemy, Player, Position};

    #[test]
    fn renders_player_entities_and_walls() {
        let mut dungeon = Dungeon::empty(2, 3);
        dungeon.grid.set_wall(Position::new(2, 0)).unwrap();
        dungeon.entities.insert(Position::new(1, 1), EntityKind::Enemy(Enemy { hp: 20, power: 10 }));
        dungeon.entities.insert(Position::new(2, 2), EntityKind::Exit);
        let snapshot = Snapshot::capture(4, &dungeon, &Player::new(100));

        let lines: Vec<String> = render_grid(&snapshot).lines().map(|l| l.trim_end().to_string()).collect();
        assert_eq!(lines, vec!["@  ·  ██", "·  E  ·", "·  ·  >"]);
        assert!(render_status(&snapshot).contains("Level 2 | HP 100 | Coins 0"));
    }

    #[test]
    fn json_updates_are_tagged() {
        let update = SessionUpdate::RunFinished { turns: 2 };
        let value: serde_json::Value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["action"], "RunFinished");
        assert_eq!(value["data"]["turns"], 2);
    }
}
