//! Session runner actor.
//!
//! Owns one [`GameSession`] and executes its queue one turn at a time, waiting
//! `delay` between turns so a renderer can keep up. Turns are atomic: every
//! other message (purchases, cancellation) is handled between two turns.

use std::time::Duration;

use actix::prelude::*;
use log::{error, info, warn};
use rand::rngs::StdRng;

use crate::game::error::GameError;
use crate::game::observer::EventBuffer;
use crate::game::session::GameSession;
use crate::runner::messages::{
    ApplyExternalEffect, ApplyPurchase, CancelRun, EnqueueCommand, GetSnapshot, IsRunning, SessionUpdate,
    StartRun, Subscribe, UnlockCommand,
};

pub type BufferedSession = GameSession<StdRng, EventBuffer>;

/// Progress of the current run.
struct RunHandle {
    next_step: Option<SpawnHandle>,
    turns: usize,
}

pub struct SessionRunner {
    session: BufferedSession,
    subscribers: Vec<Recipient<SessionUpdate>>,
    delay: Duration,
    run: Option<RunHandle>,
}

impl Actor for SessionRunner {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            "[SessionRunner] Started session {} (delay {}ms)",
            self.session.id(),
            self.delay.as_millis()
        );
    }
}

impl SessionRunner {
    pub fn new(session: BufferedSession, delay: Duration) -> Self {
        Self {
            session,
            subscribers: Vec::new(),
            delay,
            run: None,
        }
    }

    /// Replay buffered events and snapshots to every subscriber, oldest first.
    fn broadcast(&mut self) {
        for entry in self.session.observer_mut().drain() {
            self.send(SessionUpdate::from(entry));
        }
    }

    fn send(&self, update: SessionUpdate) {
        for recipient in &self.subscribers {
            recipient.do_send(update.clone());
        }
    }

    /// Execute one queued command, then schedule the next one.
    fn step(&mut self, ctx: &mut Context<Self>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.next_step = None;

        match self.session.execute_next() {
            Ok(Some(_)) => {
                run.turns += 1;
                self.broadcast();
                if self.session.pending_len() > 0 {
                    let handle = ctx.run_later(self.delay, |act, ctx| act.step(ctx));
                    if let Some(run) = self.run.as_mut() {
                        run.next_step = Some(handle);
                    }
                } else {
                    self.finish_run();
                }
            }
            Ok(None) => self.finish_run(),
            Err(err) => {
                self.fail_run(&err);
                self.finish_run();
            }
        }
    }

    fn fail_run(&mut self, err: &GameError) {
        let dropped = self.session.cancel_pending();
        error!(
            "[SessionRunner] Session {} run aborted ({} command(s) dropped): {}",
            self.session.id(),
            dropped,
            err
        );
        self.broadcast();
        let code = match err {
            GameError::GenerationExhausted { .. } => "GENERATION_EXHAUSTED",
            GameError::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            GameError::CommandLocked(_) => "COMMAND_LOCKED",
            GameError::InvalidConfig(_) => "INVALID_CONFIG",
            GameError::Parse(_) => "PARSE_ERROR",
        };
        self.send(SessionUpdate::Failed {
            code: code.to_string(),
            message: err.to_string(),
        });
    }

    fn finish_run(&mut self) {
        let turns = self.run.take().map_or(0, |run| run.turns);
        info!(
            "[SessionRunner] Session {} finished run: {} turn(s), level {}",
            self.session.id(),
            turns,
            self.session.level()
        );
        self.send(SessionUpdate::RunFinished { turns });
    }
}

impl Handler<Subscribe> for SessionRunner {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        msg.recipient.do_send(SessionUpdate::State(self.session.snapshot()));
        self.subscribers.push(msg.recipient);
    }
}

impl Handler<EnqueueCommand> for SessionRunner {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: EnqueueCommand, _: &mut Context<Self>) -> Self::Result {
        let result = self.session.enqueue(msg.command);
        self.broadcast();
        result
    }
}

impl Handler<StartRun> for SessionRunner {
    type Result = usize;

    fn handle(&mut self, _: StartRun, ctx: &mut Context<Self>) -> Self::Result {
        if self.run.is_some() {
            warn!("[SessionRunner] Session {} is already running", self.session.id());
            return 0;
        }
        let scheduled = self.session.pending_len();
        if scheduled == 0 {
            info!("[SessionRunner] Session {} has no commands to execute", self.session.id());
            self.send(SessionUpdate::RunFinished { turns: 0 });
            return 0;
        }

        self.run = Some(RunHandle { next_step: None, turns: 0 });
        self.step(ctx);
        scheduled
    }
}

impl Handler<CancelRun> for SessionRunner {
    type Result = usize;

    fn handle(&mut self, _: CancelRun, ctx: &mut Context<Self>) -> Self::Result {
        let dropped = self.session.cancel_pending();
        if let Some(handle) = self.run.as_mut().and_then(|run| run.next_step.take()) {
            ctx.cancel_future(handle);
        }
        if self.run.is_some() {
            self.finish_run();
        }
        dropped
    }
}

impl Handler<IsRunning> for SessionRunner {
    type Result = bool;

    fn handle(&mut self, _: IsRunning, _: &mut Context<Self>) -> Self::Result {
        self.run.is_some()
    }
}

impl Handler<UnlockCommand> for SessionRunner {
    type Result = bool;

    fn handle(&mut self, msg: UnlockCommand, _: &mut Context<Self>) -> Self::Result {
        let unlocked = self.session.unlock_command(msg.kind);
        self.broadcast();
        unlocked
    }
}

impl Handler<ApplyExternalEffect> for SessionRunner {
    type Result = ();

    fn handle(&mut self, msg: ApplyExternalEffect, _: &mut Context<Self>) -> Self::Result {
        self.session.apply_external_effect(msg.effect);
        self.broadcast();
    }
}

impl Handler<ApplyPurchase> for SessionRunner {
    type Result = ();

    fn handle(&mut self, msg: ApplyPurchase, _: &mut Context<Self>) -> Self::Result {
        info!("[SessionRunner] Session {} purchase completed: {:?}", self.session.id(), msg.purchase);
        self.session.apply_purchase(msg.purchase);
        self.broadcast();
    }
}

impl Handler<GetSnapshot> for SessionRunner {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.session.snapshot())
    }
}
