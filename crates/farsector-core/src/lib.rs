//! FarSector Core - Sector Simulation Engine
//!
//! The simulation layer of FarSector: sectors of space populated by
//! company-owned ships and stations, trading resources at locally
//! drifting prices while diplomacy decides who is shooting at whom.
//!
//! # Architecture
//!
//! State lives in plain owned structs and every rule is an explicit
//! function over them:
//! - **Catalog**: the tradable resources, loaded once from JSON
//! - **Companies**: money, wars, reputation, explored sectors
//! - **Spacecraft**: cargo bays and subsystem damage, owned by companies
//! - **Sectors**: local prices, trade execution, battle assessment
//!
//! The pure arithmetic (price graph, transfer caps, battle tree) lives
//! in `farsector-logic`; this crate owns the state and the orchestration.
//!
//! # Example
//!
//! ```rust,no_run
//! use farsector_core::prelude::*;
//!
//! let mut world = World::new();
//!
//! // Populate companies, sectors and spacecraft...
//!
//! // Move 10 units of fuel between two registered spacecraft
//! let fuel = world.catalog().get("fuel").unwrap().clone();
//! let moved = world.transfer("VS-001", "VS-002", &fuel, 10);
//! ```

pub mod cargo;
pub mod catalog;
pub mod company;
pub mod spacecraft;
pub mod sector;
pub mod trade;
pub mod status;
pub mod world;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::cargo::CargoBay;
    pub use crate::catalog::{ResourceCatalog, ResourceDescriptor, ResourceId};
    pub use crate::company::{Company, CompanyId, CompanyRegistry};
    pub use crate::sector::{DefaultPriceBook, OrbitParameters, Sector, SectorId, SectorPrices};
    pub use crate::spacecraft::{
        Capability, DamageState, FactoryDescription, FactoryResource, Spacecraft,
        SpacecraftDescription, SpacecraftKind, Subsystem,
    };
    pub use crate::world::World;
    pub use farsector_logic::battle::BattleState;
    pub use farsector_logic::diplomacy::Friendliness;
    pub use farsector_logic::pricing::PriceContext;
}
