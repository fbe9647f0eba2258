//! Round and match progression.
//!
//! Countdown -> Active -> RoundOver -> (Countdown | MatchOver). The state
//! machine only tracks timers and decides outcomes; resetting combatants
//! for the next round is left to the caller.

use duel_common::CombatantId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combatant::Combatant;
use crate::config::{RoundConfig, WINS_TO_MATCH};

/// Phase of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Pre-round delay; only the countdown advances.
    #[default]
    Countdown,
    /// Gameplay runs.
    Active,
    /// Frozen presentation delay after a round.
    RoundOver,
    /// Terminal.
    MatchOver,
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Combatant with strictly more health, if any
    pub winner: Option<CombatantId>,
    /// Whether the round ended on a health-reaches-zero condition
    pub knockout: bool,
}

/// What the round-over delay resolved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOverExit {
    /// Someone has enough wins; the match is over.
    MatchOver {
        /// Match winner
        winner: CombatantId,
    },
    /// Another round follows.
    NextRound,
}

/// Round/match timers and bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    phase: GamePhase,
    round_timer: f32,
    countdown_timer: f32,
    round_over_elapsed: f32,
    knockout_timer: f32,
    round_number: u32,
    last_result: Option<RoundResult>,
    match_winner: Option<CombatantId>,
    config: RoundConfig,
}

impl RoundState {
    /// Starts round one in the countdown phase.
    #[must_use]
    pub fn new(config: RoundConfig) -> Self {
        Self {
            phase: GamePhase::Countdown,
            round_timer: config.round_duration,
            countdown_timer: config.countdown_duration,
            round_over_elapsed: 0.0,
            knockout_timer: 0.0,
            round_number: 1,
            last_result: None,
            match_winner: None,
            config,
        }
    }

    /// Re-arms the timers for the following round.
    pub fn begin_next_round(&mut self, config: RoundConfig) {
        self.config = config;
        self.phase = GamePhase::Countdown;
        self.round_timer = config.round_duration;
        self.countdown_timer = config.countdown_duration;
        self.round_over_elapsed = 0.0;
        self.round_number = self.round_number.saturating_add(1);
        debug!("Round {} countdown started", self.round_number);
    }

    /// Decays the knockout signal.
    pub fn tick_knockout(&mut self, dt: f32) {
        self.knockout_timer = (self.knockout_timer - dt.max(0.0)).max(0.0);
    }

    /// Advances the countdown. Returns `true` on the tick the round goes live.
    pub fn advance_countdown(&mut self, dt: f32) -> bool {
        if self.phase != GamePhase::Countdown {
            return false;
        }
        self.countdown_timer -= dt.max(0.0);
        if self.countdown_timer <= 0.0 {
            self.countdown_timer = 0.0;
            self.phase = GamePhase::Active;
            debug!("Round {} active", self.round_number);
            return true;
        }
        false
    }

    /// Runs the round clock down, floored at zero.
    pub fn tick_round_timer(&mut self, dt: f32) {
        if self.phase == GamePhase::Active {
            self.round_timer = (self.round_timer - dt.max(0.0)).max(0.0);
        }
    }

    /// Ends the round if time is up or anyone is down, awarding the win to
    /// the combatant with strictly greater health.
    pub fn check_round_end(&mut self, combatants: &mut [Combatant; 2]) -> Option<RoundResult> {
        if self.phase != GamePhase::Active {
            return None;
        }
        let knockout = combatants.iter().any(|c| !c.is_alive());
        if self.round_timer > 0.0 && !knockout {
            return None;
        }

        let (first, second) = (combatants[0].health(), combatants[1].health());
        let winner = if first > second {
            Some(CombatantId::ONE)
        } else if second > first {
            Some(CombatantId::TWO)
        } else {
            None
        };
        if let Some(id) = winner {
            combatants[id.index()].award_win();
        }
        if knockout {
            self.knockout_timer = self.config.knockout_display;
        }

        let result = RoundResult { winner, knockout };
        self.last_result = Some(result);
        self.phase = GamePhase::RoundOver;
        self.round_over_elapsed = 0.0;

        match winner {
            Some(id) => info!(
                "Round {} won by {} ({})",
                self.round_number,
                id,
                if knockout { "knockout" } else { "time" }
            ),
            None => info!("Round {} tied", self.round_number),
        }
        Some(result)
    }

    /// Advances the round-over delay. Returns how the delay resolved once it
    /// has strictly exceeded the configured length.
    pub fn advance_round_over(
        &mut self,
        dt: f32,
        combatants: &[Combatant; 2],
    ) -> Option<RoundOverExit> {
        if self.phase != GamePhase::RoundOver {
            return None;
        }
        self.round_over_elapsed += dt.max(0.0);
        if self.round_over_elapsed <= self.config.round_over_delay {
            return None;
        }

        if let Some(winner) = combatants
            .iter()
            .find(|c| c.wins() >= WINS_TO_MATCH)
            .map(Combatant::id)
        {
            self.phase = GamePhase::MatchOver;
            self.match_winner = Some(winner);
            info!("Match won by {}", winner);
            return Some(RoundOverExit::MatchOver { winner });
        }
        Some(RoundOverExit::NextRound)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Seconds left in the round.
    #[must_use]
    pub const fn round_timer(&self) -> f32 {
        self.round_timer
    }

    /// Seconds left in the countdown.
    #[must_use]
    pub const fn countdown_timer(&self) -> f32 {
        self.countdown_timer
    }

    /// Seconds spent in the current round-over delay.
    #[must_use]
    pub const fn round_over_elapsed(&self) -> f32 {
        self.round_over_elapsed
    }

    /// Seconds left on the knockout signal.
    #[must_use]
    pub const fn knockout_timer(&self) -> f32 {
        self.knockout_timer
    }

    /// Whether the knockout signal is raised.
    #[must_use]
    pub fn knockout_active(&self) -> bool {
        self.knockout_timer > 0.0
    }

    /// One-based round number.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Result of the most recently finished round.
    #[must_use]
    pub const fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    /// Match winner, once the phase is MatchOver.
    #[must_use]
    pub const fn match_winner(&self) -> Option<CombatantId> {
        self.match_winner
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_match_over(&self) -> bool {
        self.phase == GamePhase::MatchOver
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(RoundConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuelConfig;

    fn combatants() -> [Combatant; 2] {
        let config = DuelConfig::default();
        [
            Combatant::new(CombatantId::ONE, &config),
            Combatant::new(CombatantId::TWO, &config),
        ]
    }

    fn active() -> RoundState {
        let mut round = RoundState::default();
        assert!(round.advance_countdown(3.5));
        round
    }

    #[test]
    fn test_countdown_goes_active() {
        let mut round = RoundState::default();
        assert_eq!(round.phase(), GamePhase::Countdown);
        assert!(!round.advance_countdown(3.0));
        assert!(round.advance_countdown(0.5));
        assert_eq!(round.phase(), GamePhase::Active);
        assert_eq!(round.countdown_timer(), 0.0);
    }

    #[test]
    fn test_no_end_while_both_alive_with_time_left() {
        let mut round = active();
        let mut fighters = combatants();
        round.tick_round_timer(10.0);
        assert!(round.check_round_end(&mut fighters).is_none());
        assert_eq!(round.round_timer(), 50.0);
    }

    #[test]
    fn test_timeout_awards_higher_health() {
        let mut round = active();
        let mut fighters = combatants();
        fighters[0].set_health(60.0);
        fighters[1].set_health(40.0);

        round.tick_round_timer(61.0);
        assert_eq!(round.round_timer(), 0.0);
        let result = round.check_round_end(&mut fighters).expect("round over");
        assert_eq!(result.winner, Some(CombatantId::ONE));
        assert!(!result.knockout);
        assert_eq!(fighters[0].wins(), 1);
        assert!(!round.knockout_active());
    }

    #[test]
    fn test_knockout_raises_signal() {
        let mut round = active();
        let mut fighters = combatants();
        fighters[0].apply_damage(100.0);

        let result = round.check_round_end(&mut fighters).expect("round over");
        assert_eq!(result.winner, Some(CombatantId::TWO));
        assert!(result.knockout);
        assert!(round.knockout_active());
        round.tick_knockout(1.3);
        assert!(!round.knockout_active());
    }

    #[test]
    fn test_tie_and_double_knockout_award_nothing() {
        let mut round = active();
        let mut fighters = combatants();
        round.tick_round_timer(60.0);
        let tie = round.check_round_end(&mut fighters).expect("round over");
        assert_eq!(tie.winner, None);

        let mut round = active();
        fighters[0].apply_damage(100.0);
        fighters[1].apply_damage(100.0);
        let double = round.check_round_end(&mut fighters).expect("round over");
        assert_eq!(double.winner, None);
        assert!(double.knockout);
        assert_eq!(fighters[0].wins() + fighters[1].wins(), 0);
    }

    #[test]
    fn test_round_over_delay_is_strict() {
        let mut round = active();
        let mut fighters = combatants();
        round.tick_round_timer(60.0);
        round.check_round_end(&mut fighters);

        assert!(round.advance_round_over(3.0, &fighters).is_none());
        assert_eq!(
            round.advance_round_over(0.01, &fighters),
            Some(RoundOverExit::NextRound)
        );

        round.begin_next_round(RoundConfig::default());
        assert_eq!(round.phase(), GamePhase::Countdown);
        assert_eq!(round.round_number(), 2);
        assert_eq!(round.round_timer(), 60.0);
    }

    #[test]
    fn test_second_win_ends_match() {
        let mut round = active();
        let mut fighters = combatants();
        fighters[1].award_win();
        fighters[0].apply_damage(100.0);
        round.check_round_end(&mut fighters);

        let exit = round.advance_round_over(3.1, &fighters);
        assert_eq!(
            exit,
            Some(RoundOverExit::MatchOver {
                winner: CombatantId::TWO
            })
        );
        assert!(round.is_match_over());
        assert_eq!(round.match_winner(), Some(CombatantId::TWO));
        assert!(!round.advance_countdown(5.0));
    }
}
