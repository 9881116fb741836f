//! Sector battle state decision tree and upgrade gating.
//!
//! Battle state is evaluated per observing company from a tally of the
//! living ships in the sector. Stations never enter the tally; a sector
//! full of stations with no ships is not a battle. A ship is *dangerous*
//! while its weapon subsystem still has health, and *crippled* once its
//! propulsion subsystem is fully dead and it can no longer retreat.

use serde::{Deserialize, Serialize};

/// Combat situation of a sector for one observing company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    NoBattle,
    Battle,
    BattleWon,
    BattleLost,
    /// Still fighting, but every friendly ship is crippled.
    BattleNoRetreat,
    /// Disarmed and crippled: the battle is lost and nobody can leave.
    BattleLostNoRetreat,
}

impl BattleState {
    /// Whether the sector is calm enough to build or upgrade stations.
    pub fn allows_upgrades(self) -> bool {
        matches!(self, BattleState::NoBattle | BattleState::BattleWon)
    }
}

impl std::fmt::Display for BattleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BattleState::NoBattle => "No battle",
            BattleState::Battle => "Battle",
            BattleState::BattleWon => "Battle won",
            BattleState::BattleLost => "Battle lost",
            BattleState::BattleNoRetreat => "Battle, no retreat",
            BattleState::BattleLostNoRetreat => "Battle lost, no retreat",
        };
        write!(f, "{}", text)
    }
}

/// Counts of the living ships on each side of a potential battle.
///
/// Only living ships are recorded. Crippled hostiles are not tracked;
/// whether the enemy can retreat never changes the observer's verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleTally {
    pub friendly: u32,
    pub dangerous_friendly: u32,
    pub crippled_friendly: u32,
    pub hostile: u32,
    pub dangerous_hostile: u32,
}

impl BattleTally {
    /// Count one living ship owned by the observer.
    pub fn record_friendly(&mut self, dangerous: bool, crippled: bool) {
        self.friendly += 1;
        if dangerous {
            self.dangerous_friendly += 1;
        }
        if crippled {
            self.crippled_friendly += 1;
        }
    }

    /// Count one living ship owned by a company at war with the observer.
    pub fn record_hostile(&mut self, dangerous: bool) {
        self.hostile += 1;
        if dangerous {
            self.dangerous_hostile += 1;
        }
    }
}

/// Classify the battle from a tally of living ships.
///
/// The checks form a strict decision tree; their order is authoritative
/// and ties resolve by precedence, from the top:
/// an empty side means no battle, two disarmed sides mean no battle, a
/// disarmed friendly side has lost, a disarmed hostile side has been
/// beaten, and an armed stalemate is a plain battle. At every losing or
/// ongoing step, a fully crippled friendly side upgrades the verdict to
/// its no-retreat form.
pub fn compute_battle_state(tally: &BattleTally) -> BattleState {
    // No friendly or no hostile ship
    if tally.friendly == 0 || tally.hostile == 0 {
        return BattleState::NoBattle;
    }

    // Neither side can deal damage
    if tally.dangerous_friendly == 0 && tally.dangerous_hostile == 0 {
        return BattleState::NoBattle;
    }

    // No dangerous friendly ship left, so the enemy has one: lost
    if tally.dangerous_friendly == 0 {
        if tally.crippled_friendly == tally.friendly {
            return BattleState::BattleLostNoRetreat;
        } else {
            return BattleState::BattleLost;
        }
    }

    if tally.dangerous_hostile == 0 {
        return BattleState::BattleWon;
    }

    if tally.crippled_friendly == tally.friendly {
        BattleState::BattleNoRetreat
    } else {
        BattleState::Battle
    }
}
