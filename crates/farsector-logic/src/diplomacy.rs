//! Company war states and sector friendliness tallies.

use serde::{Deserialize, Serialize};

/// Diplomatic relation between two companies, as seen from an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hostility {
    /// The observed company is the observer itself.
    Owned,
    /// No declared war between the two companies.
    Neutral,
    /// An open war has been declared.
    Hostile,
}

/// Overall stance of a sector toward an observing company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Friendliness {
    /// The observer has never visited the sector and knows nothing about it.
    NotVisited,
    Neutral,
    Friendly,
    /// Both the observer's and a hostile company's spacecraft are present.
    Contested,
    Hostile,
}

impl std::fmt::Display for Friendliness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Friendliness::NotVisited => "Unknown",
            Friendliness::Neutral => "Neutral",
            Friendliness::Friendly => "Friendly",
            Friendliness::Contested => "Contested",
            Friendliness::Hostile => "Hostile",
        };
        write!(f, "{}", text)
    }
}

/// Counts of sector occupants by their relation to the observer.
///
/// Every occupant counts here, including stations and destroyed hulls; a
/// wreck still tells the observer who was present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenceTally {
    pub friendly: u32,
    pub hostile: u32,
    pub neutral: u32,
}

impl PresenceTally {
    /// Count one occupant by its owner's relation to the observer.
    pub fn record(&mut self, relation: Hostility) {
        match relation {
            Hostility::Owned => self.friendly += 1,
            Hostility::Hostile => self.hostile += 1,
            Hostility::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.friendly + self.hostile + self.neutral
    }
}

/// Classify a sector's stance toward the observer.
///
/// An unvisited sector is always `NotVisited`, whatever it contains. An
/// empty sector is `Neutral`. Otherwise presence decides: both sides
/// present means `Contested`, one side present means that side's verdict.
pub fn compute_friendliness(visited: bool, tally: &PresenceTally) -> Friendliness {
    if !visited {
        return Friendliness::NotVisited;
    }

    if tally.total() == 0 {
        return Friendliness::Neutral;
    }

    if tally.friendly > 0 && tally.hostile > 0 {
        return Friendliness::Contested;
    }

    if tally.friendly > 0 {
        Friendliness::Friendly
    } else if tally.hostile > 0 {
        Friendliness::Hostile
    } else {
        Friendliness::Neutral
    }
}
