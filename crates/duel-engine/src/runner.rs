//! Fixed-step headless run loop.

use duel_common::{CombatantId, DuelResult};
use duel_gameplay::{Duel, DuelEvent, DuelSnapshot, GamePhase};
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, RunSettings};

/// How a run ended.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Ticks simulated
    pub ticks: u64,
    /// Simulated seconds
    pub simulated_seconds: f64,
    /// Whether the match reached its end
    pub finished: bool,
    /// Match winner, if any
    pub winner: Option<CombatantId>,
    /// Landed hits per attacker, player one first
    pub hits: [usize; 2],
    /// State after the last tick
    pub snapshot: DuelSnapshot,
}

/// Drives a [`Duel`] with no renderer and no input.
///
/// Human-controlled slots stay idle; scripted slots play on their own.
#[derive(Debug)]
pub struct HeadlessRunner {
    duel: Duel,
    settings: RunSettings,
}

impl HeadlessRunner {
    /// Creates a runner from validated configuration.
    pub fn new(config: &EngineConfig) -> DuelResult<Self> {
        let duel = Duel::new(config.duel.clone())?;
        Ok(Self {
            duel,
            settings: config.engine,
        })
    }

    /// Runs until the match ends or the time limit is reached.
    pub fn run(&mut self) -> RunSummary {
        let step = self.settings.step;
        let max_ticks = (f64::from(self.settings.max_seconds) / f64::from(step)).ceil() as u64;
        info!(
            "Running at {:.4}s per tick, limit {} ticks",
            step, max_ticks
        );

        let mut ticks = 0u64;
        let mut hits = [0usize; 2];
        while ticks < max_ticks && self.duel.phase() != GamePhase::MatchOver {
            self.duel.tick(step);
            ticks += 1;

            let events = self.duel.drain_events();
            let [first, second] = count_hits(&events);
            hits[0] += first;
            hits[1] += second;
            for event in &events {
                log_event(event);
            }
        }

        let finished = self.duel.phase() == GamePhase::MatchOver;
        let simulated_seconds = ticks as f64 * f64::from(step);
        if finished {
            info!(
                "Match finished after {:.1}s ({} hits to {})",
                simulated_seconds, hits[0], hits[1]
            );
        } else {
            warn!(
                "Time limit reached after {:.1}s without a match winner",
                simulated_seconds
            );
        }

        RunSummary {
            ticks,
            simulated_seconds,
            finished,
            winner: self.duel.round().match_winner(),
            hits,
            snapshot: self.duel.snapshot(),
        }
    }
}

fn log_event(event: &DuelEvent) {
    match event {
        DuelEvent::RoundStarted { round } => info!("Round {} started", round),
        DuelEvent::Jumped { combatant } => debug!("{} jumped", combatant),
        DuelEvent::ShotFired {
            combatant,
            projectile,
        } => debug!("{} fired {:?}", combatant, projectile),
        DuelEvent::UltimateCast {
            combatant,
            projectiles,
        } => info!("{} cast ultimate ({} projectiles)", combatant, projectiles),
        DuelEvent::Hit {
            target,
            attacker,
            damage,
            ultimate,
            ..
        } => debug!(
            "{} hit {} for {:.1}{}",
            attacker,
            target,
            damage,
            if *ultimate { " (ultimate)" } else { "" }
        ),
        DuelEvent::Blocked {
            target, attacker, ..
        } => debug!("{} blocked {}", target, attacker),
        DuelEvent::Dodged { target, attacker } => {
            debug!("{} dodged {}'s ultimate", target, attacker);
        },
        DuelEvent::Knockout { combatant } => info!("{} knocked out", combatant),
        DuelEvent::RoundOver { round, result } => match result.winner {
            Some(winner) => info!("Round {} over, {} wins", round, winner),
            None => info!("Round {} over, no winner", round),
        },
        DuelEvent::MatchOver { winner } => info!("Match over, {} wins", winner),
        DuelEvent::Paused => debug!("Paused"),
        DuelEvent::Resumed => debug!("Resumed"),
    }
}

/// Counts landed hits per attacker in a batch of events.
#[must_use]
pub fn count_hits(events: &[DuelEvent]) -> [usize; 2] {
    let mut counts = [0; 2];
    for event in events {
        if let DuelEvent::Hit { attacker, .. } = event {
            counts[attacker.index()] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.duel.ai.seed = Some(seed);
        config
    }

    #[test]
    fn test_scripted_side_beats_idle_side() {
        let mut runner = HeadlessRunner::new(&seeded(5)).expect("valid config");
        let summary = runner.run();

        assert!(summary.finished);
        assert_eq!(summary.winner, Some(CombatantId::TWO));
        assert_eq!(summary.snapshot.phase, GamePhase::MatchOver);
        assert_eq!(summary.snapshot.combatant(CombatantId::TWO).wins, 2);
        assert!(summary.simulated_seconds < 300.0);
        assert_eq!(summary.hits[0], 0);
        assert!(summary.hits[1] > 0);
    }

    #[test]
    fn test_time_limit_stops_run() {
        let mut config = seeded(5);
        config.engine.max_seconds = 2.0;
        let mut runner = HeadlessRunner::new(&config).expect("valid config");
        let summary = runner.run();

        assert!(!summary.finished);
        assert_eq!(summary.winner, None);
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.snapshot.phase, GamePhase::Countdown);
    }

    #[test]
    fn test_invalid_duel_config_rejected() {
        let mut config = EngineConfig::default();
        config.duel.round.round_duration = 0.0;
        assert!(HeadlessRunner::new(&config).is_err());
    }

    #[test]
    fn test_count_hits() {
        let hit = |attacker| DuelEvent::Hit {
            target: CombatantId::ONE,
            attacker,
            damage: 5.0,
            ultimate: false,
            position: duel_common::Vec2::ZERO,
        };
        let events = [hit(CombatantId::TWO), DuelEvent::Paused, hit(CombatantId::TWO)];
        assert_eq!(count_hits(&events), [0, 2]);
    }
}
