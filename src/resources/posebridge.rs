//! Single-writer/multiple-reader pose publishing.
//!
//! The simulation publishes a complete [`PoseSnapshot`] after each step;
//! the render side — same thread or another one — reads the most recent
//! one. Whole snapshots are the unit of exchange over a bounded(1)
//! channel, so a reader can never observe a partially-updated pose, and
//! [`PoseBridge::publish`] never blocks the simulation: when the channel
//! is full the stale snapshot is discarded and the fresh one sent.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

use crate::pose::PoseSnapshot;

/// Simulation-side handle. Lives in the ECS world as a resource.
///
/// Holds its own receiver clone so a full channel can be drained without
/// ever blocking (crossbeam channels are multi-consumer).
#[derive(Resource)]
pub struct PoseBridge {
    tx: Sender<PoseSnapshot>,
    rx: Receiver<PoseSnapshot>,
}

/// Render-side handle. Remembers the last snapshot it has seen so a slow
/// publisher never leaves the renderer with nothing to draw.
pub struct PoseReceiver {
    rx: Receiver<PoseSnapshot>,
    latest: Option<PoseSnapshot>,
}

/// Create a connected publisher/receiver pair.
pub fn pose_bridge() -> (PoseBridge, PoseReceiver) {
    let (tx, rx) = bounded(1);
    (
        PoseBridge {
            tx,
            rx: rx.clone(),
        },
        PoseReceiver { rx, latest: None },
    )
}

impl PoseBridge {
    /// Publish a snapshot, replacing any unread one. Never blocks.
    pub fn publish(&self, snapshot: PoseSnapshot) {
        match self.tx.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(snapshot)) => {
                // Reader fell behind: discard the stale snapshot. If the
                // reader grabbed it first the channel is simply empty now.
                let _ = self.rx.try_recv();
                let _ = self.tx.try_send(snapshot);
            }
            // Receiver side gone; nothing left to publish to.
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

impl PoseReceiver {
    /// The most recently published snapshot, if any has arrived yet.
    ///
    /// Drains the channel without blocking and keeps the newest complete
    /// snapshot.
    pub fn latest(&mut self) -> Option<&PoseSnapshot> {
        while let Ok(snapshot) = self.rx.try_recv() {
            self.latest = Some(snapshot);
        }
        self.latest.as_ref()
    }
}
