//! Spacecraft: ships and stations, their damage and their cargo.
//!
//! A [`SpacecraftDescription`] is the static template (hull class,
//! bays, factory lines); a [`Spacecraft`] is one registered vessel with
//! its own cargo and damage. Whether something is a ship or a station
//! is fixed in the description when it is built, never inferred later.

use serde::{Deserialize, Serialize};

use farsector_logic::pricing::PriceContext;

use crate::cargo::CargoBay;
use crate::catalog::{ResourceDescriptor, ResourceId};
use crate::company::CompanyId;
use crate::sector::SectorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacecraftKind {
    Ship,
    Station,
}

/// Station roles that matter to trade pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Hosts a population that buys consumer goods.
    Consumer,
    /// Repairs and rearms ships, consuming maintenance goods.
    Maintenance,
}

/// One resource flow of a factory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryResource {
    pub resource: ResourceId,
    pub quantity: u32,
}

/// A production line: what it eats and what it makes per cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryDescription {
    pub inputs: Vec<FactoryResource>,
    pub outputs: Vec<FactoryResource>,
}

impl FactoryDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consuming(mut self, resource: ResourceId, quantity: u32) -> Self {
        self.inputs.push(FactoryResource { resource, quantity });
        self
    }

    pub fn producing(mut self, resource: ResourceId, quantity: u32) -> Self {
        self.outputs.push(FactoryResource { resource, quantity });
        self
    }

    pub fn takes_as_input(&self, resource: ResourceId) -> bool {
        self.inputs.iter().any(|flow| flow.resource == resource)
    }

    pub fn makes_as_output(&self, resource: ResourceId) -> bool {
        self.outputs.iter().any(|flow| flow.resource == resource)
    }
}

/// Static template a spacecraft is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacecraftDescription {
    pub identifier: String,
    pub name: String,
    pub kind: SpacecraftKind,
    pub cargo_bay_count: u32,
    pub cargo_bay_capacity: u32,
    pub capabilities: Vec<Capability>,
    pub factories: Vec<FactoryDescription>,
}

impl SpacecraftDescription {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        kind: SpacecraftKind,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            kind,
            cargo_bay_count: 0,
            cargo_bay_capacity: 0,
            capabilities: Vec::new(),
            factories: Vec::new(),
        }
    }

    pub fn with_cargo(mut self, bay_count: u32, bay_capacity: u32) -> Self {
        self.cargo_bay_count = bay_count;
        self.cargo_bay_capacity = bay_capacity;
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn with_factory(mut self, factory: FactoryDescription) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Damageable subsystems of a spacecraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subsystem {
    Hull,
    Weapon,
    Propulsion,
}

/// Subsystem health, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageState {
    pub hull: f32,
    pub weapon: f32,
    pub propulsion: f32,
}

impl DamageState {
    /// A fully healthy spacecraft.
    pub fn new() -> Self {
        Self {
            hull: 1.0,
            weapon: 1.0,
            propulsion: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hull > 0.0
    }

    /// Can still deal damage.
    pub fn is_dangerous(&self) -> bool {
        self.weapon > 0.0
    }

    /// Can no longer move, so cannot retreat from a battle.
    pub fn is_crippled(&self) -> bool {
        self.propulsion <= 0.0
    }

    pub fn damage(&mut self, subsystem: Subsystem, amount: f32) {
        let health = self.subsystem_mut(subsystem);
        *health = (*health - amount).max(0.0);
    }

    pub fn repair(&mut self, subsystem: Subsystem, amount: f32) {
        let health = self.subsystem_mut(subsystem);
        *health = (*health + amount).min(1.0);
    }

    fn subsystem_mut(&mut self, subsystem: Subsystem) -> &mut f32 {
        match subsystem {
            Subsystem::Hull => &mut self.hull,
            Subsystem::Weapon => &mut self.weapon,
            Subsystem::Propulsion => &mut self.propulsion,
        }
    }
}

impl Default for DamageState {
    fn default() -> Self {
        Self::new()
    }
}

/// One registered vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    /// Unique registration, e.g. `"VS-017"`.
    pub immatriculation: String,
    pub company: CompanyId,
    pub sector: SectorId,
    pub description: SpacecraftDescription,
    pub cargo: CargoBay,
    pub damage: DamageState,
}

impl Spacecraft {
    pub fn new(
        immatriculation: impl Into<String>,
        company: impl Into<CompanyId>,
        sector: impl Into<SectorId>,
        description: SpacecraftDescription,
    ) -> Self {
        let cargo = CargoBay::new(description.cargo_bay_count, description.cargo_bay_capacity);
        Self {
            immatriculation: immatriculation.into(),
            company: company.into(),
            sector: sector.into(),
            description,
            cargo,
            damage: DamageState::new(),
        }
    }

    pub fn is_station(&self) -> bool {
        self.description.kind == SpacecraftKind::Station
    }

    pub fn is_ship(&self) -> bool {
        self.description.kind == SpacecraftKind::Ship
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.description.has_capability(capability)
    }

    /// Price context this spacecraft applies to a resource.
    ///
    /// Ships always trade at the default price. Stations price by their
    /// first factory line touching the resource, inputs before outputs,
    /// then by station role for consumer and maintenance goods.
    pub fn resource_use_context(&self, resource: &ResourceDescriptor) -> PriceContext {
        if !self.is_station() {
            return PriceContext::Default;
        }
        for factory in &self.description.factories {
            if factory.takes_as_input(resource.id) {
                return PriceContext::FactoryInput;
            }
            if factory.makes_as_output(resource.id) {
                return PriceContext::FactoryOutput;
            }
        }
        if resource.is_consumer_good && self.has_capability(Capability::Consumer) {
            return PriceContext::ConsumerConsumption;
        }
        if resource.is_maintenance_good && self.has_capability(Capability::Maintenance) {
            return PriceContext::FactoryInput;
        }
        PriceContext::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceCatalog;

    #[test]
    fn test_damage_and_repair_clamp() {
        let mut damage = DamageState::new();
        damage.damage(Subsystem::Weapon, 0.4);
        assert!((damage.weapon - 0.6).abs() < 1e-6);
        damage.damage(Subsystem::Weapon, 2.0);
        assert_eq!(damage.weapon, 0.0);
        damage.repair(Subsystem::Weapon, 0.3);
        assert!((damage.weapon - 0.3).abs() < 1e-6);
        damage.repair(Subsystem::Weapon, 5.0);
        assert_eq!(damage.weapon, 1.0);
    }

    #[test]
    fn test_classification_thresholds() {
        let mut damage = DamageState::new();
        assert!(damage.is_alive());
        assert!(damage.is_dangerous());
        assert!(!damage.is_crippled());

        damage.damage(Subsystem::Weapon, 1.0);
        assert!(!damage.is_dangerous());

        damage.damage(Subsystem::Propulsion, 1.0);
        assert!(damage.is_crippled());

        damage.damage(Subsystem::Hull, 1.0);
        assert!(!damage.is_alive());
    }

    #[test]
    fn test_description_builder() {
        let catalog = ResourceCatalog::standard();
        let feo = catalog.get("feo").unwrap().id;
        let steel = catalog.get("steel").unwrap().id;

        let description = SpacecraftDescription::new("mill", "Steel Mill", SpacecraftKind::Station)
            .with_cargo(6, 200)
            .with_capability(Capability::Consumer)
            .with_factory(FactoryDescription::new().consuming(feo, 20).producing(steel, 10));

        assert_eq!(description.cargo_bay_count, 6);
        assert!(description.has_capability(Capability::Consumer));
        assert!(!description.has_capability(Capability::Maintenance));
        assert!(description.factories[0].takes_as_input(feo));
        assert!(description.factories[0].makes_as_output(steel));
        assert!(!description.factories[0].takes_as_input(steel));
    }

    #[test]
    fn test_spacecraft_cargo_sized_from_description() {
        let description =
            SpacecraftDescription::new("hauler", "Hauler", SpacecraftKind::Ship).with_cargo(4, 100);
        let ship = Spacecraft::new("VS-001", "alpha", "kestrel-3-0", description);
        assert!(ship.is_ship());
        assert!(!ship.is_station());
        assert_eq!(ship.cargo.total_capacity(), 400);
        assert!(ship.damage.is_alive());
    }

    #[test]
    fn test_use_context_checks_inputs_before_outputs() {
        let catalog = ResourceCatalog::standard();
        let fuel = catalog.get("fuel").unwrap();
        let steel = catalog.get("steel").unwrap();

        let refinery = Spacecraft::new(
            "ST-001",
            "alpha",
            "kestrel-3-0",
            SpacecraftDescription::new("refinery", "Refinery", SpacecraftKind::Station)
                .with_factory(
                    FactoryDescription::new()
                        .consuming(steel.id, 20)
                        .producing(fuel.id, 50),
                )
                .with_factory(FactoryDescription::new().consuming(fuel.id, 5)),
        );

        assert_eq!(
            refinery.resource_use_context(steel),
            PriceContext::FactoryInput
        );
        // The first factory outputs fuel; the later input line never runs
        assert_eq!(
            refinery.resource_use_context(fuel),
            PriceContext::FactoryOutput
        );
    }

    #[test]
    fn test_use_context_for_station_roles_and_ships() {
        let catalog = ResourceCatalog::standard();
        let food = catalog.get("food").unwrap();
        let supply = catalog.get("fleet-supply").unwrap();
        let steel = catalog.get("steel").unwrap();

        let habitat = Spacecraft::new(
            "ST-002",
            "alpha",
            "kestrel-3-0",
            SpacecraftDescription::new("habitat", "Habitat", SpacecraftKind::Station)
                .with_capability(Capability::Consumer)
                .with_capability(Capability::Maintenance),
        );
        assert_eq!(
            habitat.resource_use_context(food),
            PriceContext::ConsumerConsumption
        );
        assert_eq!(
            habitat.resource_use_context(supply),
            PriceContext::FactoryInput
        );
        assert_eq!(habitat.resource_use_context(steel), PriceContext::Default);

        let ship = Spacecraft::new(
            "VS-002",
            "alpha",
            "kestrel-3-0",
            SpacecraftDescription::new("hauler", "Hauler", SpacecraftKind::Ship).with_cargo(2, 100),
        );
        assert_eq!(ship.resource_use_context(food), PriceContext::Default);
    }
}
