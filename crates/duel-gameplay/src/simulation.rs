//! The duel simulation context and its tick-driven clock.
//!
//! [`Duel`] owns every piece of mutable state: both combatants, the
//! projectile pool, round bookkeeping, scripted controllers and the event
//! bus. A host feeds it [`Command`]s between ticks and calls
//! [`Duel::tick`] once per frame.
//!
//! Within an active tick the order is fixed:
//!
//! 1. queued AI actions from the previous tick are applied
//! 2. combatant timers and vertical motion
//! 3. projectile motion and culling
//! 4. collision resolution
//! 5. round-end check
//! 6. AI observation, queuing actions for the next tick

use duel_common::{CombatantId, ConfigError, ProjectileId};
use tracing::{debug, info, trace};

use crate::ai::{AiAction, AiController};
use crate::collision::{CollisionResolver, HitOutcome, Resolution};
use crate::combatant::{AttackKind, Combatant, Volley};
use crate::config::{ControllerKind, DuelConfig};
use crate::events::{DuelEvent, EventBus};
use crate::input::{Command, ControlAction};
use crate::projectile::ProjectilePool;
use crate::round::{GamePhase, RoundOverExit, RoundState};
use crate::snapshot::{CombatantView, DuelSnapshot, ProjectileView};

/// A complete best-of-three duel.
#[derive(Debug)]
pub struct Duel {
    config: DuelConfig,
    pending_config: Option<DuelConfig>,
    combatants: [Combatant; 2],
    projectiles: ProjectilePool,
    resolver: CollisionResolver,
    round: RoundState,
    ai: [Option<AiController>; 2],
    queued: Vec<(CombatantId, AiAction)>,
    events: EventBus,
    paused: bool,
}

impl Duel {
    /// Creates a duel in round one's countdown.
    pub fn new(config: DuelConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let combatants = CombatantId::all().map(|id| Combatant::new(id, &config));
        let ai = CombatantId::all().map(|id| controller_for(&config, id));
        info!(
            "Duel created: {} vs {}",
            combatants[0].character(),
            combatants[1].character()
        );

        Ok(Self {
            resolver: CollisionResolver::new(config.hitbox),
            round: RoundState::new(config.round),
            combatants,
            projectiles: ProjectilePool::new(),
            ai,
            queued: Vec::new(),
            events: EventBus::default(),
            paused: false,
            pending_config: None,
            config,
        })
    }

    // ===== Input =====

    /// Applies a control command. Returns whether it took effect.
    ///
    /// Commands are honoured only while a round is active and the
    /// simulation is running.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.paused || self.round.phase() != GamePhase::Active {
            trace!(
                "{:?} for {} ignored in {:?}",
                command.action,
                command.combatant,
                self.round.phase()
            );
            return false;
        }

        let id = command.combatant;
        let combatant = &mut self.combatants[id.index()];
        match command.action {
            ControlAction::Jump => self.jump(id),
            ControlAction::AttackStart => {
                combatant.request_attack_start();
                true
            },
            ControlAction::AttackRelease => {
                let volley = combatant.request_attack_release();
                self.spawn_volley(id, volley)
            },
            ControlAction::DefendStart => combatant.request_defend_start(),
            ControlAction::DefendStop => combatant.request_defend_stop(),
        }
    }

    /// Flips the pause flag. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    /// Sets the pause flag.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.events.publish(if paused {
            DuelEvent::Paused
        } else {
            DuelEvent::Resumed
        });
        debug!("Simulation {}", if paused { "paused" } else { "resumed" });
    }

    /// Whether the simulation is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Validates and stages a configuration for the next round reset.
    pub fn update_config(&mut self, config: DuelConfig) -> Result<(), ConfigError> {
        config.validate()?;
        debug!("Configuration staged for next round");
        self.pending_config = Some(config);
        Ok(())
    }

    // ===== Clock =====

    /// Advances the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.round.phase() {
            GamePhase::Countdown => {
                if self.round.advance_countdown(dt) {
                    self.events.publish(DuelEvent::RoundStarted {
                        round: self.round.round_number(),
                    });
                }
            },
            GamePhase::Active => self.step_active(dt),
            GamePhase::RoundOver => match self.round.advance_round_over(dt, &self.combatants) {
                Some(RoundOverExit::MatchOver { winner }) => {
                    self.events.publish(DuelEvent::MatchOver { winner });
                },
                Some(RoundOverExit::NextRound) => self.reset_round(),
                None => {},
            },
            GamePhase::MatchOver => return,
        }

        self.round.tick_knockout(dt);
    }

    fn step_active(&mut self, dt: f32) {
        self.apply_queued();

        self.round.tick_round_timer(dt);

        let gravity = self.config.physics.gravity;
        for combatant in &mut self.combatants {
            combatant.tick(dt, gravity);
        }

        let culled = self.projectiles.update(dt, self.config.arena.width);
        if culled > 0 {
            trace!("Culled {} projectiles", culled);
        }

        let resolutions = self.resolver.resolve(&mut self.projectiles, &mut self.combatants);
        self.projectiles.sweep();
        for resolution in resolutions {
            self.publish_resolution(&resolution);
        }

        if let Some(result) = self.round.check_round_end(&mut self.combatants) {
            self.events.publish(DuelEvent::RoundOver {
                round: self.round.round_number(),
                result,
            });
            return;
        }

        for (slot, controller) in self.ai.iter_mut().enumerate() {
            let Some(controller) = controller else {
                continue;
            };
            let me = &self.combatants[slot];
            let actions = controller.decide(me, dt, self.projectiles.as_slice());
            self.queued
                .extend(actions.into_iter().map(|action| (me.id(), action)));
        }
    }

    fn apply_queued(&mut self) {
        for (id, action) in std::mem::take(&mut self.queued) {
            match action {
                AiAction::Jump => {
                    self.jump(id);
                },
                AiAction::FireNormal => {
                    let volley = self.combatants[id.index()].fire_normal();
                    self.spawn_volley(id, volley);
                },
                AiAction::FireUltimate => {
                    let volley = self.combatants[id.index()].fire_ultimate();
                    self.spawn_volley(id, volley);
                },
            }
        }
    }

    fn jump(&mut self, id: CombatantId) -> bool {
        let jumped = self.combatants[id.index()].request_jump();
        if jumped {
            self.events.publish(DuelEvent::Jumped { combatant: id });
        }
        jumped
    }

    fn spawn_volley(&mut self, id: CombatantId, volley: Option<Volley>) -> bool {
        let Some(volley) = volley else {
            return false;
        };

        let count = volley.projectiles.len();
        let mut first = ProjectileId::NULL;
        for projectile in volley.projectiles {
            let spawned = self.projectiles.spawn(projectile);
            if !first.is_valid() {
                first = spawned;
            }
        }

        match volley.kind {
            AttackKind::Normal => self.events.publish(DuelEvent::ShotFired {
                combatant: id,
                projectile: first,
            }),
            AttackKind::Ultimate => {
                debug!("{} cast ultimate ({} projectiles)", id, count);
                self.events.publish(DuelEvent::UltimateCast {
                    combatant: id,
                    projectiles: count,
                });
            },
        }
        true
    }

    fn publish_resolution(&self, resolution: &Resolution) {
        let target = resolution.target;
        let attacker = resolution.owner;
        match resolution.outcome {
            HitOutcome::Dodged => self.events.publish(DuelEvent::Dodged { target, attacker }),
            HitOutcome::Blocked => self.events.publish(DuelEvent::Blocked {
                target,
                attacker,
                position: resolution.position,
            }),
            HitOutcome::Hit { damage, .. } => {
                self.events.publish(DuelEvent::Hit {
                    target,
                    attacker,
                    damage,
                    ultimate: resolution.is_ultimate,
                    position: resolution.position,
                });
                if damage > 0.0 && !self.combatants[target.index()].is_alive() {
                    self.events.publish(DuelEvent::Knockout { combatant: target });
                }
            },
        }
    }

    fn reset_round(&mut self) {
        if let Some(config) = self.pending_config.take() {
            info!("Applying staged configuration");
            for id in CombatantId::all() {
                let slot = &mut self.ai[id.index()];
                match (config.fighter(id).controller, slot.as_mut()) {
                    (ControllerKind::Ai, Some(controller)) => controller.set_config(config.ai),
                    (ControllerKind::Ai, None) => *slot = Some(AiController::new(config.ai, id)),
                    (ControllerKind::Human, _) => *slot = None,
                }
            }
            self.resolver = CollisionResolver::new(config.hitbox);
            self.config = config;
        }

        for combatant in &mut self.combatants {
            combatant.reset_for_round(&self.config);
        }
        self.projectiles.clear();
        self.queued.clear();
        self.round.begin_next_round(self.config.round);
    }

    // ===== Queries =====

    /// Read-only frame state for a renderer.
    #[must_use]
    pub fn snapshot(&self) -> DuelSnapshot {
        DuelSnapshot {
            phase: self.round.phase(),
            round: self.round.round_number(),
            round_timer: self.round.round_timer(),
            countdown_timer: self.round.countdown_timer(),
            knockout_active: self.round.knockout_active(),
            paused: self.paused,
            last_result: self.round.last_result(),
            match_winner: self.round.match_winner(),
            combatants: [
                CombatantView::from(&self.combatants[0]),
                CombatantView::from(&self.combatants[1]),
            ],
            projectiles: self
                .projectiles
                .iter()
                .filter(|p| p.is_armed() && !p.is_spent())
                .map(ProjectileView::from)
                .collect(),
        }
    }

    /// Takes every pending effect event.
    pub fn drain_events(&self) -> Vec<DuelEvent> {
        self.events.drain()
    }

    /// The effect event bus.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Configuration in effect this round.
    #[must_use]
    pub const fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Configuration waiting for the next round reset.
    #[must_use]
    pub const fn pending_config(&self) -> Option<&DuelConfig> {
        self.pending_config.as_ref()
    }

    /// A combatant by slot.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> &Combatant {
        &self.combatants[id.index()]
    }

    /// Both combatants, player one first.
    #[must_use]
    pub const fn combatants(&self) -> &[Combatant; 2] {
        &self.combatants
    }

    /// Live projectiles.
    #[must_use]
    pub const fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    /// Round and match bookkeeping.
    #[must_use]
    pub const fn round(&self) -> &RoundState {
        &self.round
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.round.phase()
    }

    /// Whether a slot is driven by the scripted opponent.
    #[must_use]
    pub fn is_ai_controlled(&self, id: CombatantId) -> bool {
        self.ai[id.index()].is_some()
    }

    #[cfg(test)]
    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> &mut Combatant {
        &mut self.combatants[id.index()]
    }
}

fn controller_for(config: &DuelConfig, id: CombatantId) -> Option<AiController> {
    match config.fighter(id).controller {
        ControllerKind::Ai => Some(AiController::new(config.ai, id)),
        ControllerKind::Human => None,
    }
}
