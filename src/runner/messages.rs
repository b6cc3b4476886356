use actix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::error::GameError;
use crate::game::events::{GameEvent, Snapshot};
use crate::game::observer::Observed;
use crate::game::types::{Command, CommandKind, ExternalEffect, Purchase};

/// Append a command to the session queue.
#[derive(Message)]
#[rtype(result = "Result<(), GameError>")]
pub struct EnqueueCommand {
    pub command: Command,
}

/// Start executing the queue. Returns how many commands were scheduled
/// (0 when the queue is empty or a run is already going).
#[derive(Message)]
#[rtype(result = "usize")]
pub struct StartRun;

/// Drop the commands that have not started yet. Returns how many were dropped.
#[derive(Message)]
#[rtype(result = "usize")]
pub struct CancelRun;

/// `true` while a run is in progress.
#[derive(Message)]
#[rtype(result = "bool")]
pub struct IsRunning;

/// Sent by the purchase flow once a payment completed.
#[derive(Message)]
#[rtype(result = "bool")]
pub struct UnlockCommand {
    pub kind: CommandKind,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ApplyExternalEffect {
    pub effect: ExternalEffect,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ApplyPurchase {
    pub purchase: Purchase,
}

#[derive(Message)]
#[rtype(result = "Snapshot")]
pub struct GetSnapshot;

/// Register a recipient for every [`SessionUpdate`].
#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub recipient: Recipient<SessionUpdate>,
}

/// Pushed to subscribers.
#[derive(Message, Clone, Serialize, Deserialize, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum SessionUpdate {
    State(Snapshot),
    Event(GameEvent),
    RunFinished { turns: usize },
    /// The run stopped on a fatal error; the rest of the queue was dropped.
    Failed { code: String, message: String },
}

impl From<Observed> for SessionUpdate {
    fn from(entry: Observed) -> Self {
        match entry {
            Observed::State(snapshot) => SessionUpdate::State(snapshot),
            Observed::Event(event) => SessionUpdate::Event(event),
        }
    }
}
