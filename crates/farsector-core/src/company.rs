//! Companies: money, wars, reputation and exploration records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use farsector_logic::diplomacy::Hostility;

use crate::sector::SectorId;

pub type CompanyId = String;

/// A trading company. Owns spacecraft, holds a credit balance and keeps
/// its own view of diplomacy: which companies it is at war with and how
/// much it likes the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub identifier: CompanyId,
    pub name: String,
    money: u64,
    hostile: BTreeSet<CompanyId>,
    reputation: BTreeMap<CompanyId, f32>,
    visited: BTreeSet<SectorId>,
}

impl Company {
    pub fn new(identifier: impl Into<CompanyId>, name: impl Into<String>, money: u64) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            money,
            hostile: BTreeSet::new(),
            reputation: BTreeMap::new(),
            visited: BTreeSet::new(),
        }
    }

    pub fn money(&self) -> u64 {
        self.money
    }

    /// Withdraw up to `amount`, bounded by the balance. Returns the
    /// amount actually withdrawn.
    pub fn take_money(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.money);
        self.money -= taken;
        taken
    }

    pub fn give_money(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// This company's attitude toward `other`.
    pub fn war_state(&self, other: &str) -> Hostility {
        if other == self.identifier {
            Hostility::Owned
        } else if self.hostile.contains(other) {
            Hostility::Hostile
        } else {
            Hostility::Neutral
        }
    }

    pub fn reputation(&self, other: &str) -> f32 {
        self.reputation.get(other).copied().unwrap_or(0.0)
    }

    /// Shift reputation toward `other` by `amount`, clamped to ±100.
    pub fn give_reputation(&mut self, other: impl Into<CompanyId>, amount: f32) {
        let entry = self.reputation.entry(other.into()).or_insert(0.0);
        *entry = (*entry + amount).clamp(-100.0, 100.0);
    }

    pub fn mark_visited(&mut self, sector: impl Into<SectorId>) {
        self.visited.insert(sector.into());
    }

    pub fn has_visited(&self, sector: &str) -> bool {
        self.visited.contains(sector)
    }

    fn set_hostile(&mut self, other: impl Into<CompanyId>) {
        self.hostile.insert(other.into());
    }

    fn clear_hostile(&mut self, other: &str) {
        self.hostile.remove(other);
    }
}

/// All companies in the game, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRegistry {
    companies: BTreeMap<CompanyId, Company>,
}

impl CompanyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a company. A second registration under the same identifier is
    /// ignored so references held elsewhere stay valid.
    pub fn register(&mut self, company: Company) {
        if self.companies.contains_key(&company.identifier) {
            log::warn!(
                "company '{}' already registered, ignoring duplicate",
                company.identifier
            );
            return;
        }
        self.companies.insert(company.identifier.clone(), company);
    }

    pub fn get(&self, identifier: &str) -> Option<&Company> {
        self.companies.get(identifier)
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut Company> {
        self.companies.get_mut(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.companies.values()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Put two companies at war with each other. Wars are mutual.
    pub fn declare_war(&mut self, a: &str, b: &str) {
        if a == b {
            log::warn!("company '{}' cannot declare war on itself", a);
            return;
        }
        if self.get(a).is_none() || self.get(b).is_none() {
            log::warn!("cannot declare war between '{}' and '{}': unknown company", a, b);
            return;
        }
        if let Some(company) = self.companies.get_mut(a) {
            company.set_hostile(b);
        }
        if let Some(company) = self.companies.get_mut(b) {
            company.set_hostile(a);
        }
    }

    /// End a war in both directions.
    pub fn make_peace(&mut self, a: &str, b: &str) {
        if let Some(company) = self.companies.get_mut(a) {
            company.clear_hostile(b);
        }
        if let Some(company) = self.companies.get_mut(b) {
            company.clear_hostile(a);
        }
    }
}
