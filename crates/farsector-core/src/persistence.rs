//! Save/Load functionality for persisting world state
//!
//! Uses bincode for the binary envelope. Sector prices are saved keyed
//! by resource identifier rather than by resource id, so a price
//! survives the catalog gaining or losing entries around it. Loading
//! goes through the normal registration path, so entries referencing
//! unknown companies or sectors are dropped with a warning instead of
//! corrupting the world.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ResourceCatalog;
use crate::company::Company;
use crate::sector::{Sector, SectorSave};
use crate::spacecraft::Spacecraft;
use crate::world::World;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the whole world
#[derive(Serialize, Deserialize)]
pub struct WorldSave {
    /// Save format version
    pub version: u32,
    pub companies: Vec<Company>,
    pub sectors: Vec<SectorSave>,
    pub spacecraft: Vec<Spacecraft>,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Save the complete world to a writer
pub fn save_world<W: Write>(writer: W, world: &World) -> Result<(), SaveError> {
    let save = WorldSave {
        version: SAVE_VERSION,
        companies: world.companies().iter().cloned().collect(),
        sectors: world
            .sectors()
            .map(|sector| sector.to_save(world.catalog()))
            .collect(),
        spacecraft: world.spacecraft_list().to_vec(),
    };

    bincode::serialize_into(writer, &save)?;
    Ok(())
}

/// Load a world from a reader, resolving resources against `catalog`
pub fn load_world<R: Read>(reader: R, catalog: ResourceCatalog) -> Result<World, SaveError> {
    let save: WorldSave = bincode::deserialize_from(reader)?;

    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }

    let mut world = World::with_catalog(catalog);
    for company in save.companies {
        world.register_company(company);
    }
    for sector_save in save.sectors {
        let sector = Sector::from_save(sector_save, world.catalog());
        world.register_sector(sector);
    }
    for spacecraft in save.spacecraft {
        world.register_spacecraft(spacecraft);
    }

    Ok(world)
}
