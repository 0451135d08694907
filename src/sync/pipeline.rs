// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced, serialized, rate-limited remote saves.
//!
//! Two tasks cooperate:
//!
//! - the debounce task restarts a timer on every [`SavePipeline::schedule`] call and enqueues a
//!   single save task once the timer elapses without a new call;
//! - the send task is the only consumer of that queue. It waits out the minimum interval since the
//!   previous send, reads the *current* document snapshot and sends it. Failures are reported
//!   through the [`Notifier`] and never retried; the next queued task runs regardless.
//!
//! At most one request is in flight at any time because there is exactly one consumer.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant, Sleep};
use tracing::{debug, info, warn};

use crate::model::{Document, UserId};
use crate::notify::Notifier;
use crate::remote::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveConfig {
    /// Quiet period after the last mutation before a save is enqueued.
    pub debounce: Duration,
    /// Minimum spacing between the starts of two consecutive sends.
    pub min_interval: Duration,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            min_interval: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    TimerPending,
    Enqueued,
    Sending,
}

impl PipelineStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TimerPending => "timer-pending",
            Self::Enqueued => "enqueued",
            Self::Sending => "sending",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub scheduled: u64,
    pub enqueued: u64,
    pub sent: u64,
    pub failed: u64,
}

/// Observable pipeline state, published on every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineState {
    timer_armed: bool,
    queued: usize,
    sending: bool,
    stats: PipelineStats,
}

impl PipelineState {
    pub fn status(&self) -> PipelineStatus {
        if self.sending {
            PipelineStatus::Sending
        } else if self.queued > 0 {
            PipelineStatus::Enqueued
        } else if self.timer_armed {
            PipelineStatus::TimerPending
        } else {
            PipelineStatus::Idle
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn is_idle(&self) -> bool {
        self.status() == PipelineStatus::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceMsg {
    Touch,
    Shutdown,
}

/// Marker for one queued save; the payload is read from the snapshot at send time.
#[derive(Debug)]
struct SaveTask;

/// Handle to the running pipeline for one user.
#[derive(Debug)]
pub struct SavePipeline {
    user: UserId,
    debounce_tx: mpsc::UnboundedSender<DebounceMsg>,
    state_rx: watch::Receiver<PipelineState>,
    debounce_task: JoinHandle<()>,
    send_task: JoinHandle<()>,
}

impl SavePipeline {
    /// Starts the pipeline tasks on the current tokio runtime.
    ///
    /// `snapshot` must always hold the latest document; the send task clones it right before
    /// each request.
    pub fn spawn<R: RemoteStore>(
        user: UserId,
        remote: Arc<R>,
        snapshot: watch::Receiver<Document>,
        notifier: Notifier,
        config: SaveConfig,
    ) -> Self {
        let (debounce_tx, debounce_rx) = mpsc::unbounded_channel();
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PipelineState::default());
        let state_tx = Arc::new(state_tx);

        let debounce_task = tokio::spawn(run_debounce(
            debounce_rx,
            queue_tx,
            Arc::clone(&state_tx),
            config.debounce,
        ));
        let send_task = tokio::spawn(run_sender(SendCtx {
            user: user.clone(),
            remote,
            snapshot,
            notifier,
            state: state_tx,
            min_interval: config.min_interval,
            queue: queue_rx,
        }));

        debug!(user = %user, ?config, "save pipeline started");
        Self {
            user,
            debounce_tx,
            state_rx,
            debounce_task,
            send_task,
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Records a mutation: (re)starts the debounce timer.
    pub fn schedule(&self) {
        if self.debounce_tx.send(DebounceMsg::Touch).is_err() {
            warn!(user = %self.user, "save pipeline is gone; mutation not scheduled");
        }
    }

    pub fn state(&self) -> PipelineState {
        *self.state_rx.borrow()
    }

    pub fn status(&self) -> PipelineStatus {
        self.state().status()
    }

    pub fn stats(&self) -> PipelineStats {
        self.state().stats()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state_rx.clone()
    }

    /// Fires a pending debounce timer immediately, lets the queue drain and waits for both tasks.
    pub async fn shutdown(self) -> PipelineStats {
        let _ = self.debounce_tx.send(DebounceMsg::Shutdown);
        if let Err(err) = self.debounce_task.await {
            warn!(user = %self.user, %err, "debounce task failed");
        }
        if let Err(err) = self.send_task.await {
            warn!(user = %self.user, %err, "send task failed");
        }
        let stats = self.state_rx.borrow().stats();
        info!(
            user = %self.user,
            sent = stats.sent,
            failed = stats.failed,
            "save pipeline stopped"
        );
        stats
    }
}

fn enqueue(queue: &mpsc::UnboundedSender<SaveTask>, state: &watch::Sender<PipelineState>) {
    state.send_modify(|s| {
        s.timer_armed = false;
        s.queued += 1;
        s.stats.enqueued += 1;
    });
    if queue.send(SaveTask).is_err() {
        state.send_modify(|s| s.queued = s.queued.saturating_sub(1));
        warn!("send task is gone; save dropped");
    }
}

async fn run_debounce(
    mut rx: mpsc::UnboundedReceiver<DebounceMsg>,
    queue: mpsc::UnboundedSender<SaveTask>,
    state: Arc<watch::Sender<PipelineState>>,
    debounce: Duration,
) {
    let mut timer: Option<Pin<Box<Sleep>>> = None;
    loop {
        tokio::select! {
            maybe = rx.recv() => {
                match maybe {
                    Some(DebounceMsg::Touch) => {
                        timer = Some(Box::pin(sleep(debounce)));
                        state.send_modify(|s| {
                            s.timer_armed = true;
                            s.stats.scheduled += 1;
                        });
                    }
                    Some(DebounceMsg::Shutdown) | None => {
                        if timer.take().is_some() {
                            enqueue(&queue, &state);
                        }
                        break;
                    }
                }
            }
            _ = async {
                if let Some(timer) = &mut timer {
                    timer.await;
                }
            }, if timer.is_some() => {
                timer = None;
                enqueue(&queue, &state);
            }
        }
    }
}

struct SendCtx<R> {
    user: UserId,
    remote: Arc<R>,
    snapshot: watch::Receiver<Document>,
    notifier: Notifier,
    state: Arc<watch::Sender<PipelineState>>,
    min_interval: Duration,
    queue: mpsc::UnboundedReceiver<SaveTask>,
}

async fn run_sender<R: RemoteStore>(mut ctx: SendCtx<R>) {
    let mut last_sent: Option<Instant> = None;
    while let Some(SaveTask) = ctx.queue.recv().await {
        ctx.state.send_modify(|s| {
            s.queued = s.queued.saturating_sub(1);
            s.sending = true;
        });

        if let Some(last) = last_sent {
            let ready = last + ctx.min_interval;
            if Instant::now() < ready {
                debug!(user = %ctx.user, wait_ms = (ready - Instant::now()).as_millis() as u64, "rate gate");
                sleep_until(ready).await;
            }
        }

        let doc = ctx.snapshot.borrow().clone();
        last_sent = Some(Instant::now());
        match ctx.remote.save_document(&ctx.user, &doc).await {
            Ok(()) => {
                ctx.state.send_modify(|s| s.stats.sent += 1);
                info!(user = %ctx.user, folders = doc.folders().len(), "saved");
                ctx.notifier.success("Saved");
            }
            Err(err) => {
                ctx.state.send_modify(|s| s.stats.failed += 1);
                warn!(user = %ctx.user, %err, "save failed");
                ctx.notifier
                    .error(format!("Save failed, check your connection: {}", err.user_message()));
            }
        }

        ctx.state.send_modify(|s| s.sending = false);
    }
}
