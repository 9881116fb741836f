//! The game world: one catalog, all companies, sectors and spacecraft.
//!
//! Everything is owned here, in plain collections. Spacecraft reference
//! their company and sector by identifier; occupant lists are computed
//! from those references on demand instead of being maintained as
//! back-pointers that could go stale.

use std::collections::BTreeMap;

use farsector_logic::battle::BattleState;
use farsector_logic::diplomacy::Friendliness;

use crate::catalog::{ResourceCatalog, ResourceDescriptor};
use crate::company::{Company, CompanyRegistry};
use crate::sector::{DefaultPriceBook, Sector, SectorId};
use crate::spacecraft::Spacecraft;
use crate::status;

pub struct World {
    catalog: ResourceCatalog,
    default_prices: DefaultPriceBook,
    companies: CompanyRegistry,
    sectors: BTreeMap<SectorId, Sector>,
    spacecraft: Vec<Spacecraft>,
}

impl World {
    /// An empty world over the standard resource catalog.
    pub fn new() -> Self {
        Self::with_catalog(ResourceCatalog::standard())
    }

    pub fn with_catalog(catalog: ResourceCatalog) -> Self {
        let default_prices = DefaultPriceBook::new(&catalog);
        Self {
            catalog,
            default_prices,
            companies: CompanyRegistry::new(),
            sectors: BTreeMap::new(),
            spacecraft: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn default_prices(&self) -> &DefaultPriceBook {
        &self.default_prices
    }

    pub fn companies(&self) -> &CompanyRegistry {
        &self.companies
    }

    pub fn companies_mut(&mut self) -> &mut CompanyRegistry {
        &mut self.companies
    }

    pub fn register_company(&mut self, company: Company) {
        self.companies.register(company);
    }

    pub fn register_sector(&mut self, sector: Sector) {
        if self.sectors.contains_key(&sector.identifier) {
            log::warn!(
                "sector '{}' already registered, ignoring duplicate",
                sector.identifier
            );
            return;
        }
        self.sectors.insert(sector.identifier.clone(), sector);
    }

    /// Add a spacecraft. Rejects duplicates and references to companies
    /// or sectors this world does not know.
    pub fn register_spacecraft(&mut self, spacecraft: Spacecraft) {
        if self.spacecraft(&spacecraft.immatriculation).is_some() {
            log::warn!(
                "spacecraft '{}' already registered, ignoring duplicate",
                spacecraft.immatriculation
            );
            return;
        }
        if self.companies.get(&spacecraft.company).is_none() {
            log::warn!(
                "spacecraft '{}' belongs to unknown company '{}', rejecting it",
                spacecraft.immatriculation,
                spacecraft.company
            );
            return;
        }
        if !self.sectors.contains_key(&spacecraft.sector) {
            log::warn!(
                "spacecraft '{}' sits in unknown sector '{}', rejecting it",
                spacecraft.immatriculation,
                spacecraft.sector
            );
            return;
        }
        self.spacecraft.push(spacecraft);
    }

    pub fn sector(&self, identifier: &str) -> Option<&Sector> {
        self.sectors.get(identifier)
    }

    pub fn sector_mut(&mut self, identifier: &str) -> Option<&mut Sector> {
        self.sectors.get_mut(identifier)
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.values()
    }

    pub fn spacecraft(&self, immatriculation: &str) -> Option<&Spacecraft> {
        self.spacecraft
            .iter()
            .find(|spacecraft| spacecraft.immatriculation == immatriculation)
    }

    pub fn spacecraft_mut(&mut self, immatriculation: &str) -> Option<&mut Spacecraft> {
        self.spacecraft
            .iter_mut()
            .find(|spacecraft| spacecraft.immatriculation == immatriculation)
    }

    pub fn spacecraft_list(&self) -> &[Spacecraft] {
        &self.spacecraft
    }

    /// Every spacecraft currently in a sector, wrecks included.
    pub fn sector_occupants(&self, sector: &str) -> Vec<&Spacecraft> {
        self.spacecraft
            .iter()
            .filter(|spacecraft| spacecraft.sector == sector)
            .collect()
    }

    /// Move resources between two registered spacecraft, by
    /// registration. Returns the quantity delivered.
    pub fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        resource: &ResourceDescriptor,
        quantity: u32,
    ) -> u32 {
        if source == destination {
            log::warn!(
                "cannot transfer '{}' from '{}' to itself",
                resource.identifier,
                source
            );
            return 0;
        }
        let source_index = match self.spacecraft_index(source) {
            Some(index) => index,
            None => {
                log::warn!("unknown spacecraft '{}', cannot transfer", source);
                return 0;
            }
        };
        let destination_index = match self.spacecraft_index(destination) {
            Some(index) => index,
            None => {
                log::warn!("unknown spacecraft '{}', cannot transfer", destination);
                return 0;
            }
        };

        let sector_id = self.spacecraft[source_index].sector.clone();
        let sector = match self.sectors.get_mut(&sector_id) {
            Some(sector) => sector,
            None => {
                log::warn!("spacecraft '{}' sits in unknown sector '{}'", source, sector_id);
                return 0;
            }
        };

        let (source_craft, destination_craft) =
            pair_mut(&mut self.spacecraft, source_index, destination_index);
        sector.transfer(
            source_craft,
            destination_craft,
            &mut self.companies,
            resource,
            quantity,
            &self.default_prices,
        )
    }

    /// Friendliness of a sector for a company. Unknown sectors and
    /// companies read as unexplored.
    pub fn sector_friendliness(&self, sector: &str, company: &str) -> Friendliness {
        let (sector, observer) = match (self.sectors.get(sector), self.companies.get(company)) {
            (Some(sector), Some(observer)) => (sector, observer),
            _ => {
                log::warn!(
                    "unknown sector '{}' or company '{}', reporting it unexplored",
                    sector,
                    company
                );
                return Friendliness::NotVisited;
            }
        };
        let occupants = self.sector_occupants(&sector.identifier);
        status::sector_friendliness(sector, observer, &self.companies, &occupants)
    }

    /// Battle state of a sector for a company. Unknown sectors and
    /// companies read as calm.
    pub fn sector_battle_state(&self, sector: &str, company: &str) -> BattleState {
        let observer = match (self.sectors.contains_key(sector), self.companies.get(company)) {
            (true, Some(observer)) => observer,
            _ => {
                log::warn!(
                    "unknown sector '{}' or company '{}', reporting no battle",
                    sector,
                    company
                );
                return BattleState::NoBattle;
            }
        };
        let occupants = self.sector_occupants(sector);
        status::sector_battle_state(observer, &self.companies, &occupants)
    }

    /// Whether a company may build or upgrade stations in a sector.
    pub fn can_upgrade_in(&self, sector: &str, company: &str) -> bool {
        let observer = match (self.sectors.contains_key(sector), self.companies.get(company)) {
            (true, Some(observer)) => observer,
            _ => {
                log::warn!(
                    "unknown sector '{}' or company '{}', denying upgrades",
                    sector,
                    company
                );
                return false;
            }
        };
        let occupants = self.sector_occupants(sector);
        status::can_upgrade(observer, &self.companies, &occupants)
    }

    fn spacecraft_index(&self, immatriculation: &str) -> Option<usize> {
        self.spacecraft
            .iter()
            .position(|spacecraft| spacecraft.immatriculation == immatriculation)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct mutable references to two spacecraft of the same list.
fn pair_mut(spacecraft: &mut [Spacecraft], a: usize, b: usize) -> (&mut Spacecraft, &mut Spacecraft) {
    if a < b {
        let (left, right) = spacecraft.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = spacecraft.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::OrbitParameters;
    use crate::spacecraft::{SpacecraftDescription, SpacecraftKind};

    fn demo_world() -> World {
        let mut world = World::new();
        world.register_company(Company::new("alpha", "Alpha Haulage", 1_000_000));
        world.register_company(Company::new("beta", "Beta Works", 1_000_000));
        world.register_sector(Sector::new(OrbitParameters::new("kestrel", 3, 0)));
        world.register_sector(Sector::new(OrbitParameters::new("kestrel", 5, 1)));

        let hauler = SpacecraftDescription::new("hauler", "Hauler", SpacecraftKind::Ship)
            .with_cargo(4, 100);
        world.register_spacecraft(Spacecraft::new(
            "VS-001",
            "alpha",
            "kestrel-3-0",
            hauler.clone(),
        ));
        world.register_spacecraft(Spacecraft::new(
            "VS-002",
            "beta",
            "kestrel-3-0",
            hauler.clone(),
        ));
        world.register_spacecraft(Spacecraft::new("VS-003", "beta", "kestrel-5-1", hauler));
        world
    }

    #[test]
    fn test_registration_rejects_bad_references() {
        let mut world = demo_world();
        let hauler = SpacecraftDescription::new("hauler", "Hauler", SpacecraftKind::Ship)
            .with_cargo(4, 100);

        world.register_spacecraft(Spacecraft::new(
            "VS-001",
            "alpha",
            "kestrel-3-0",
            hauler.clone(),
        ));
        world.register_spacecraft(Spacecraft::new(
            "VS-100",
            "ghost",
            "kestrel-3-0",
            hauler.clone(),
        ));
        world.register_spacecraft(Spacecraft::new("VS-101", "alpha", "nowhere-0-0", hauler));

        assert_eq!(world.spacecraft_list().len(), 3);
        assert!(world.spacecraft("VS-100").is_none());
        assert!(world.spacecraft("VS-101").is_none());
    }

    #[test]
    fn test_sector_occupants_filter_by_sector() {
        let world = demo_world();
        let near = world.sector_occupants("kestrel-3-0");
        assert_eq!(near.len(), 2);
        let far = world.sector_occupants("kestrel-5-1");
        assert_eq!(far.len(), 1);
        assert_eq!(far[0].immatriculation, "VS-003");
    }

    #[test]
    fn test_transfer_by_registration() {
        let mut world = demo_world();
        let fuel = world.catalog().get("fuel").unwrap().clone();
        world
            .spacecraft_mut("VS-001")
            .unwrap()
            .cargo
            .give(fuel.id, 100);

        let moved = world.transfer("VS-001", "VS-002", &fuel, 10);
        assert_eq!(moved, 10);
        assert_eq!(
            world.spacecraft("VS-002").unwrap().cargo.quantity_of(fuel.id),
            10
        );
        assert_eq!(
            world.companies().get("alpha").unwrap().money(),
            1_000_000 + 18_000
        );
        assert_eq!(
            world.companies().get("beta").unwrap().money(),
            1_000_000 - 18_000
        );
    }

    #[test]
    fn test_transfer_rejects_self_and_unknown() {
        let mut world = demo_world();
        let fuel = world.catalog().get("fuel").unwrap().clone();
        world
            .spacecraft_mut("VS-001")
            .unwrap()
            .cargo
            .give(fuel.id, 100);

        assert_eq!(world.transfer("VS-001", "VS-001", &fuel, 10), 0);
        assert_eq!(world.transfer("VS-001", "VS-999", &fuel, 10), 0);
        assert_eq!(world.transfer("VS-999", "VS-001", &fuel, 10), 0);
        assert_eq!(
            world.spacecraft("VS-001").unwrap().cargo.quantity_of(fuel.id),
            100
        );
    }

    #[test]
    fn test_status_wrappers_default_safely() {
        let world = demo_world();
        assert_eq!(
            world.sector_friendliness("nowhere-0-0", "alpha"),
            Friendliness::NotVisited
        );
        assert_eq!(
            world.sector_battle_state("kestrel-3-0", "ghost"),
            BattleState::NoBattle
        );
        assert!(!world.can_upgrade_in("nowhere-0-0", "alpha"));
    }

    #[test]
    fn test_status_wrappers_see_occupants() {
        let mut world = demo_world();
        world.companies_mut().declare_war("alpha", "beta");
        world
            .companies_mut()
            .get_mut("alpha")
            .unwrap()
            .mark_visited("kestrel-3-0");

        assert_eq!(
            world.sector_friendliness("kestrel-3-0", "alpha"),
            Friendliness::Contested
        );
        assert_eq!(
            world.sector_battle_state("kestrel-3-0", "alpha"),
            BattleState::Battle
        );
        assert!(!world.can_upgrade_in("kestrel-3-0", "alpha"));
        // The far sector holds a single enemy hauler and no station
        assert_eq!(
            world.sector_battle_state("kestrel-5-1", "alpha"),
            BattleState::NoBattle
        );
    }
}
