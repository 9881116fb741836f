//! Pure sector logic for FarSector.
//!
//! This crate contains the market and combat-state rules that are independent
//! of any engine, storage, or world model. Functions take plain data and
//! return results, making them unit-testable and portable between the
//! simulation core, headless tools, and any future game host.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`battle`] | Sector battle state decision tree and upgrade gating |
//! | [`diplomacy`] | Company war states and sector friendliness tallies |
//! | [`pricing`] | Price contexts and the fixed default price graph |
//! | [`transfer`] | Affordability and capacity capping for trades |

pub mod battle;
pub mod diplomacy;
pub mod pricing;
pub mod transfer;
