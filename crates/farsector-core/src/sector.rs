//! Sectors of space and their local resource prices.
//!
//! A sector is identified by the orbit it sits on. Its price table
//! starts empty and fills lazily: the first time anyone asks about a
//! resource, the catalog default is copied in, and from then on the
//! sector's own copy drifts independently of every other sector.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use farsector_logic::pricing::{self, PriceContext};

use crate::catalog::{ResourceCatalog, ResourceDescriptor, ResourceId};

pub type SectorId = String;

/// Where a sector sits: which body it orbits, how high, and at which
/// phase angle slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitParameters {
    pub celestial_body: String,
    pub altitude: u32,
    pub phase: u32,
}

impl OrbitParameters {
    pub fn new(celestial_body: impl Into<String>, altitude: u32, phase: u32) -> Self {
        Self {
            celestial_body: celestial_body.into(),
            altitude,
            phase,
        }
    }

    /// Canonical sector identifier for this orbit, e.g. `"kestrel-3-0"`.
    pub fn code(&self) -> String {
        format!("{}-{}-{}", self.celestial_body, self.altitude, self.phase)
    }
}

/// Baseline prices per resource, computed once from the catalog.
///
/// Indexed by [`ResourceId`]; a `None` entry means the resource has no
/// known baseline and sectors will price it at zero.
#[derive(Debug, Clone)]
pub struct DefaultPriceBook {
    defaults: Vec<Option<f32>>,
}

impl DefaultPriceBook {
    pub fn new(catalog: &ResourceCatalog) -> Self {
        let defaults = catalog
            .iter()
            .map(|resource| pricing::default_price(&resource.identifier))
            .collect();
        Self { defaults }
    }

    pub fn get(&self, resource: ResourceId) -> Option<f32> {
        self.defaults.get(resource.index()).copied().flatten()
    }
}

/// A sector's own price table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorPrices {
    prices: BTreeMap<ResourceId, f32>,
}

impl SectorPrices {
    /// Exact price of a resource in this sector, in fractional credits.
    ///
    /// Initializes the entry from the default book on first access. A
    /// resource without a baseline is priced at zero.
    pub fn precise_price(
        &mut self,
        resource: &ResourceDescriptor,
        defaults: &DefaultPriceBook,
    ) -> f32 {
        if let Some(&price) = self.prices.get(&resource.id) {
            return price;
        }
        let initial = match defaults.get(resource.id) {
            Some(price) => price,
            None => {
                log::warn!(
                    "resource '{}' has no default price, pricing it at zero",
                    resource.identifier
                );
                0.0
            }
        };
        self.prices.insert(resource.id, initial);
        initial
    }

    /// Overwrite the price of a resource. Negative prices are clamped
    /// to zero.
    pub fn set_price(&mut self, resource: &ResourceDescriptor, price: f32) {
        let price = if price < 0.0 {
            log::warn!(
                "rejecting negative price {} for '{}', clamping to zero",
                price,
                resource.identifier
            );
            0.0
        } else {
            price
        };
        self.prices.insert(resource.id, price);
    }

    /// Price in whole credits for a given trade context.
    pub fn price(
        &mut self,
        resource: &ResourceDescriptor,
        context: PriceContext,
        defaults: &DefaultPriceBook,
    ) -> u64 {
        pricing::contextual_price(self.precise_price(resource, defaults), context)
    }

    /// Whether this sector has its own entry for the resource yet.
    pub fn is_priced(&self, resource: ResourceId) -> bool {
        self.prices.contains_key(&resource)
    }

    /// Replace the table with entries from a save file. Entries naming
    /// resources missing from the catalog are dropped.
    pub fn load_entries(&mut self, entries: &[ResourcePriceSave], catalog: &ResourceCatalog) {
        self.prices.clear();
        for entry in entries {
            match catalog.get(&entry.identifier) {
                Some(resource) => self.set_price(resource, entry.price),
                None => {
                    log::warn!(
                        "saved price for unknown resource '{}', dropping it",
                        entry.identifier
                    );
                }
            }
        }
    }

    /// Export the table keyed by resource identifier, in catalog order.
    /// Resources this sector never priced are not exported.
    pub fn save_entries(&self, catalog: &ResourceCatalog) -> Vec<ResourcePriceSave> {
        catalog
            .iter()
            .filter_map(|resource| {
                self.prices.get(&resource.id).map(|&price| ResourcePriceSave {
                    identifier: resource.identifier.clone(),
                    price,
                })
            })
            .collect()
    }
}

/// One saved sector price, keyed by identifier so saves survive catalog
/// reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePriceSave {
    pub identifier: String,
    pub price: f32,
}

/// Serialized form of a [`Sector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSave {
    pub identifier: SectorId,
    pub given_name: Option<String>,
    pub orbit: OrbitParameters,
    pub local_time: u64,
    pub prices: Vec<ResourcePriceSave>,
}

/// A sector of space.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub identifier: SectorId,
    /// Player-facing name, when the sector has been baptized.
    pub given_name: Option<String>,
    pub orbit: OrbitParameters,
    /// Seconds of simulation time elapsed in this sector.
    pub local_time: u64,
    pub prices: SectorPrices,
}

impl Sector {
    pub fn new(orbit: OrbitParameters) -> Self {
        Self {
            identifier: orbit.code(),
            given_name: None,
            orbit,
            local_time: 0,
            prices: SectorPrices::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.given_name = Some(name.into());
        self
    }

    /// Canonical orbit code of this sector.
    pub fn code(&self) -> String {
        self.orbit.code()
    }

    /// Name to show players: the given name if any, the orbit code
    /// otherwise.
    pub fn display_name(&self) -> String {
        match &self.given_name {
            Some(name) => name.clone(),
            None => self.code(),
        }
    }

    pub fn to_save(&self, catalog: &ResourceCatalog) -> SectorSave {
        SectorSave {
            identifier: self.identifier.clone(),
            given_name: self.given_name.clone(),
            orbit: self.orbit.clone(),
            local_time: self.local_time,
            prices: self.prices.save_entries(catalog),
        }
    }

    pub fn from_save(save: SectorSave, catalog: &ResourceCatalog) -> Self {
        let mut prices = SectorPrices::default();
        prices.load_entries(&save.prices, catalog);
        Self {
            identifier: save.identifier,
            given_name: save.given_name,
            orbit: save.orbit,
            local_time: save.local_time,
            prices,
        }
    }
}
