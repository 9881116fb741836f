//! Tradable resource catalog.
//!
//! Resources are declared in `data/resource_catalog.json`, embedded at
//! compile time. Loading mints a dense [`ResourceId`] per entry in file
//! order, so the rest of the engine can index price tables by id instead
//! of hashing identifier strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dense index of a resource inside its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(u16);

impl ResourceId {
    /// Position of the resource in catalog order, usable as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid resource catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate resource identifier '{identifier}'")]
    DuplicateIdentifier { identifier: String },
}

/// One tradable resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: ResourceId,
    /// Stable machine identifier, e.g. `"fuel"`. Keys save files.
    pub identifier: String,
    /// Human-readable name, e.g. `"Fuel"`.
    pub name: String,
    /// Consumed by station crews; sold to stations at consumer prices.
    pub is_consumer_good: bool,
    /// Consumed by maintenance bays when repairing spacecraft.
    pub is_maintenance_good: bool,
}

/// Catalog manifest entry as written in the JSON file.
#[derive(Debug, Deserialize)]
struct RawResource {
    identifier: String,
    name: String,
    #[serde(default)]
    consumer: bool,
    #[serde(default)]
    maintenance: bool,
}

/// All tradable resources, in declaration order.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    resources: Vec<ResourceDescriptor>,
    by_identifier: BTreeMap<String, u16>,
}

impl ResourceCatalog {
    /// Parse a catalog from its JSON manifest.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawResource> = serde_json::from_str(json)?;

        let mut resources = Vec::with_capacity(raw.len());
        let mut by_identifier = BTreeMap::new();
        for (index, entry) in raw.into_iter().enumerate() {
            if by_identifier
                .insert(entry.identifier.clone(), index as u16)
                .is_some()
            {
                return Err(CatalogError::DuplicateIdentifier {
                    identifier: entry.identifier,
                });
            }
            resources.push(ResourceDescriptor {
                id: ResourceId(index as u16),
                identifier: entry.identifier,
                name: entry.name,
                is_consumer_good: entry.consumer,
                is_maintenance_good: entry.maintenance,
            });
        }

        Ok(Self {
            resources,
            by_identifier,
        })
    }

    /// The catalog shipped with the game, embedded at compile time.
    pub fn standard() -> Self {
        const CATALOG_JSON: &str = include_str!("../../../data/resource_catalog.json");
        Self::from_json(CATALOG_JSON).expect("resource_catalog.json is invalid")
    }

    /// Look a resource up by its machine identifier.
    pub fn get(&self, identifier: &str) -> Option<&ResourceDescriptor> {
        self.by_identifier
            .get(identifier)
            .map(|&index| &self.resources[index as usize])
    }

    /// Look a resource up by id.
    pub fn descriptor(&self, id: ResourceId) -> Option<&ResourceDescriptor> {
        self.resources.get(id.index())
    }

    /// Iterate descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
