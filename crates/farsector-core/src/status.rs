//! Sector status as seen by one company.
//!
//! These assessments are recomputed from the occupant list on every
//! query; nothing here is cached. Friendliness looks at every
//! spacecraft, wrecks and stations included, because presence is
//! political. Battle state only counts living ships, because wrecks
//! and stations do not fight.

use farsector_logic::battle::{compute_battle_state, BattleState, BattleTally};
use farsector_logic::diplomacy::{compute_friendliness, Friendliness, Hostility, PresenceTally};

use crate::company::{Company, CompanyRegistry};
use crate::sector::Sector;
use crate::spacecraft::Spacecraft;

fn owner_attitude(companies: &CompanyRegistry, owner: &str, observer: &Company) -> Hostility {
    match companies.get(owner) {
        Some(company) => company.war_state(&observer.identifier),
        None => {
            log::warn!(
                "spacecraft owner '{}' is not registered, treating it as neutral",
                owner
            );
            Hostility::Neutral
        }
    }
}

/// How welcoming a sector looks to `observer`.
///
/// A sector the observer never visited is unknown regardless of what
/// sits in it.
pub fn sector_friendliness(
    sector: &Sector,
    observer: &Company,
    companies: &CompanyRegistry,
    occupants: &[&Spacecraft],
) -> Friendliness {
    let visited = observer.has_visited(&sector.identifier);

    let mut tally = PresenceTally::default();
    for occupant in occupants {
        tally.record(owner_attitude(companies, &occupant.company, observer));
    }

    compute_friendliness(visited, &tally)
}

/// Combat situation of a sector for `observer`, from its occupants.
pub fn sector_battle_state(
    observer: &Company,
    companies: &CompanyRegistry,
    occupants: &[&Spacecraft],
) -> BattleState {
    let mut tally = BattleTally::default();
    for occupant in occupants {
        if occupant.is_station() || !occupant.damage.is_alive() {
            continue;
        }
        let dangerous = occupant.damage.is_dangerous();
        match owner_attitude(companies, &occupant.company, observer) {
            Hostility::Owned => {
                tally.record_friendly(dangerous, occupant.damage.is_crippled());
            }
            Hostility::Hostile => tally.record_hostile(dangerous),
            Hostility::Neutral => {}
        }
    }

    compute_battle_state(&tally)
}

/// Whether `observer` may build or upgrade stations in the sector.
///
/// Needs a calm sector and at least one station owned by somebody who
/// is not at war with the observer.
pub fn can_upgrade(
    observer: &Company,
    companies: &CompanyRegistry,
    occupants: &[&Spacecraft],
) -> bool {
    if !sector_battle_state(observer, companies, occupants).allows_upgrades() {
        return false;
    }

    occupants.iter().any(|occupant| {
        occupant.is_station()
            && owner_attitude(companies, &occupant.company, observer) != Hostility::Hostile
    })
}
