//! Fire-and-forget effect notifications.
//!
//! The simulation publishes; the host drains and maps events to audio or
//! visual feedback. Nothing in the core waits on a consumer.

use crossbeam_channel::{bounded, Receiver, Sender};
use duel_common::{CombatantId, ProjectileId, Vec2};
use serde::{Deserialize, Serialize};

use crate::round::RoundResult;

/// Default bus capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Effect events emitted by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DuelEvent {
    /// A round's countdown finished and play began.
    RoundStarted {
        /// One-based round number
        round: u32,
    },
    /// A combatant jumped.
    Jumped {
        /// Who jumped
        combatant: CombatantId,
    },
    /// A normal shot was fired.
    ShotFired {
        /// Shooter
        combatant: CombatantId,
        /// Spawned projectile
        projectile: ProjectileId,
    },
    /// An ultimate was cast.
    UltimateCast {
        /// Caster
        combatant: CombatantId,
        /// Number of projectiles spawned
        projectiles: usize,
    },
    /// Damage landed.
    Hit {
        /// Who was hit
        target: CombatantId,
        /// Who fired
        attacker: CombatantId,
        /// Health removed
        damage: f32,
        /// Whether the projectile was an ultimate
        ultimate: bool,
        /// Contact point
        position: Vec2,
    },
    /// A shot was absorbed by a defend stance or was a decoy.
    Blocked {
        /// Who blocked
        target: CombatantId,
        /// Who fired
        attacker: CombatantId,
        /// Contact point
        position: Vec2,
    },
    /// An ultimate was dodged.
    Dodged {
        /// Who dodged
        target: CombatantId,
        /// Who fired
        attacker: CombatantId,
    },
    /// A combatant's health reached zero.
    Knockout {
        /// Who went down
        combatant: CombatantId,
    },
    /// A round finished.
    RoundOver {
        /// One-based round number
        round: u32,
        /// Outcome
        result: RoundResult,
    },
    /// The match finished.
    MatchOver {
        /// Winner
        winner: CombatantId,
    },
    /// The simulation was paused.
    Paused,
    /// The simulation was resumed.
    Resumed,
}

/// Bounded event bus. Events published while the bus is full are dropped.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<DuelEvent>,
    receiver: Receiver<DuelEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: DuelEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<DuelEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(4);
        bus.publish(DuelEvent::Paused);
        bus.publish(DuelEvent::Jumped {
            combatant: CombatantId::ONE,
        });
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], DuelEvent::Paused);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops() {
        let bus = EventBus::new(2);
        for _ in 0..5 {
            bus.publish(DuelEvent::Resumed);
        }
        assert_eq!(bus.drain().len(), 2);
        assert_eq!(bus.capacity(), 2);
    }

    #[test]
    fn test_events_serialize() {
        let event = DuelEvent::MatchOver {
            winner: CombatantId::TWO,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let back: DuelEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
