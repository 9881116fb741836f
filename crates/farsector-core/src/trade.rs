//! Resource transfers between spacecraft of a sector.
//!
//! A transfer moves cargo from one spacecraft to another at the
//! sector's local price. Same-company moves are free logistics;
//! cross-company moves are trades, paid by the receiving company and
//! rewarded with a little mutual reputation.

use farsector_logic::pricing::PriceContext;
use farsector_logic::transfer::{affordable_quantity, transfer_quota, TRADE_REPUTATION_GAIN};

use crate::catalog::ResourceDescriptor;
use crate::company::CompanyRegistry;
use crate::sector::{DefaultPriceBook, Sector};
use crate::spacecraft::Spacecraft;

impl Sector {
    /// Unit price for moving `resource` between these two spacecraft.
    ///
    /// The station party sets the context: it buys its factory inputs
    /// and its crew or maintenance consumables a little above the local
    /// price, and sells its factory outputs a little below. With a
    /// station on both ends the source wins; between two ships the
    /// default price applies.
    pub fn transfer_price(
        &mut self,
        source: &Spacecraft,
        destination: &Spacecraft,
        resource: &ResourceDescriptor,
        defaults: &DefaultPriceBook,
    ) -> u64 {
        let station = if source.is_station() {
            Some(source)
        } else if destination.is_station() {
            Some(destination)
        } else {
            None
        };

        let context = match station {
            Some(station) => match station.resource_use_context(resource) {
                // Consumables are traded at input prices; the consumer
                // markup applies to consumption, not to trades
                PriceContext::ConsumerConsumption => PriceContext::FactoryInput,
                other => other,
            },
            None => PriceContext::Default,
        };

        self.prices.price(resource, context, defaults)
    }

    /// Move up to `quantity` units of `resource` from `source` to
    /// `destination`, paying and rewarding the companies involved.
    /// Returns the quantity actually delivered.
    ///
    /// Rejected outright, with a warning: parties in different sectors,
    /// station-to-station moves, and cross-company trades involving an
    /// unregistered company.
    pub fn transfer(
        &mut self,
        source: &mut Spacecraft,
        destination: &mut Spacecraft,
        companies: &mut CompanyRegistry,
        resource: &ResourceDescriptor,
        quantity: u32,
        defaults: &DefaultPriceBook,
    ) -> u32 {
        if source.sector != destination.sector {
            log::warn!(
                "cannot transfer '{}': '{}' and '{}' are in different sectors",
                resource.identifier,
                source.immatriculation,
                destination.immatriculation
            );
            return 0;
        }
        if source.is_station() && destination.is_station() {
            log::warn!(
                "cannot transfer '{}' from '{}' to '{}': station to station transfers are not allowed",
                resource.identifier,
                source.immatriculation,
                destination.immatriculation
            );
            return 0;
        }

        let cross_company = source.company != destination.company;
        if cross_company
            && (companies.get(&source.company).is_none()
                || companies.get(&destination.company).is_none())
        {
            log::warn!(
                "cannot trade between '{}' and '{}': unregistered company",
                source.company,
                destination.company
            );
            return 0;
        }

        let unit_price = self.transfer_price(source, destination, resource, defaults);

        let affordable = if cross_company {
            let buyer_money = companies
                .get(&destination.company)
                .map(|company| company.money())
                .unwrap_or(0);
            affordable_quantity(buyer_money, unit_price)
        } else {
            u32::MAX
        };
        let free_space = destination.cargo.free_space_for(resource.id);
        let quantity_to_take = transfer_quota(quantity, affordable, free_space);

        let taken = source.cargo.take(resource.id, quantity_to_take);
        let given = destination.cargo.give(resource.id, taken);

        if given < taken {
            // Destination rejected part of the load, return it
            let returned = source.cargo.give(resource.id, taken - given);
            if returned < taken - given {
                log::warn!(
                    "{} units of '{}' lost returning cargo to '{}'",
                    taken - given - returned,
                    resource.identifier,
                    source.immatriculation
                );
            }
        }

        if given > 0 && cross_company {
            let payment = unit_price.saturating_mul(given as u64);
            let paid = match companies.get_mut(&destination.company) {
                Some(buyer) => buyer.take_money(payment),
                None => 0,
            };
            if let Some(seller) = companies.get_mut(&source.company) {
                seller.give_money(paid);
                seller.give_reputation(destination.company.clone(), TRADE_REPUTATION_GAIN);
            }
            if let Some(buyer) = companies.get_mut(&destination.company) {
                buyer.give_reputation(source.company.clone(), TRADE_REPUTATION_GAIN);
            }
        }

        given
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceCatalog;
    use crate::company::Company;
    use crate::sector::OrbitParameters;
    use crate::spacecraft::{
        Capability, FactoryDescription, SpacecraftDescription, SpacecraftKind,
    };

    struct Fixture {
        catalog: ResourceCatalog,
        defaults: DefaultPriceBook,
        sector: Sector,
        companies: CompanyRegistry,
    }

    fn fixture() -> Fixture {
        let catalog = ResourceCatalog::standard();
        let defaults = DefaultPriceBook::new(&catalog);
        let sector = Sector::new(OrbitParameters::new("kestrel", 3, 0));
        let mut companies = CompanyRegistry::new();
        companies.register(Company::new("alpha", "Alpha Haulage", 1_000_000));
        companies.register(Company::new("beta", "Beta Works", 1_000_000));
        Fixture {
            catalog,
            defaults,
            sector,
            companies,
        }
    }

    fn hauler(immatriculation: &str, company: &str) -> Spacecraft {
        Spacecraft::new(
            immatriculation,
            company,
            "kestrel-3-0",
            SpacecraftDescription::new("hauler", "Hauler", SpacecraftKind::Ship).with_cargo(4, 100),
        )
    }

    fn station(
        immatriculation: &str,
        company: &str,
        description: SpacecraftDescription,
    ) -> Spacecraft {
        Spacecraft::new(immatriculation, company, "kestrel-3-0", description)
    }

    #[test]
    fn test_price_between_ships_is_default() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        let a = hauler("VS-001", "alpha");
        let b = hauler("VS-002", "beta");
        assert_eq!(f.sector.transfer_price(&a, &b, fuel, &f.defaults), 1800);
    }

    #[test]
    fn test_station_side_sets_the_price() {
        let mut f = fixture();
        let steel = f.catalog.get("steel").unwrap();
        let ship = hauler("VS-001", "alpha");
        let mill = station(
            "ST-001",
            "beta",
            SpacecraftDescription::new("mill", "Steel Mill", SpacecraftKind::Station)
                .with_cargo(8, 200)
                .with_factory(FactoryDescription::new().producing(steel.id, 10)),
        );
        let forge = station(
            "ST-002",
            "beta",
            SpacecraftDescription::new("forge", "Forge", SpacecraftKind::Station)
                .with_cargo(8, 200)
                .with_factory(FactoryDescription::new().consuming(steel.id, 10)),
        );

        // Buying the mill's output: slightly under the local price
        assert_eq!(
            f.sector.transfer_price(&mill, &ship, steel, &f.defaults),
            14503
        );
        // Selling the forge its input: slightly over
        assert_eq!(
            f.sector.transfer_price(&ship, &forge, steel, &f.defaults),
            14796
        );
        // Source station wins when both ends are stations
        assert_eq!(
            f.sector.transfer_price(&mill, &forge, steel, &f.defaults),
            14503
        );
    }

    #[test]
    fn test_consumables_trade_at_input_prices() {
        let mut f = fixture();
        let food = f.catalog.get("food").unwrap();
        let supply = f.catalog.get("fleet-supply").unwrap();
        let ship = hauler("VS-001", "alpha");
        let habitat = station(
            "ST-001",
            "beta",
            SpacecraftDescription::new("habitat", "Habitat", SpacecraftKind::Station)
                .with_cargo(8, 200)
                .with_capability(Capability::Consumer)
                .with_capability(Capability::Maintenance),
        );

        assert_eq!(
            f.sector.transfer_price(&ship, &habitat, food, &f.defaults),
            10723
        );
        assert_eq!(
            f.sector.transfer_price(&ship, &habitat, supply, &f.defaults),
            34180
        );
    }

    #[test]
    fn test_transfer_rejects_cross_sector_and_station_pairs() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();

        let mut a = hauler("VS-001", "alpha");
        a.cargo.give(fuel.id, 100);
        let mut elsewhere = hauler("VS-002", "alpha");
        elsewhere.sector = "kestrel-9-0".into();
        assert_eq!(
            f.sector
                .transfer(&mut a, &mut elsewhere, &mut f.companies, fuel, 10, &f.defaults),
            0
        );
        assert_eq!(a.cargo.quantity_of(fuel.id), 100);

        let base = SpacecraftDescription::new("depot", "Depot", SpacecraftKind::Station)
            .with_cargo(4, 100);
        let mut s1 = station("ST-001", "alpha", base.clone());
        let mut s2 = station("ST-002", "alpha", base);
        s1.cargo.give(fuel.id, 50);
        assert_eq!(
            f.sector
                .transfer(&mut s1, &mut s2, &mut f.companies, fuel, 10, &f.defaults),
            0
        );
        assert_eq!(s1.cargo.quantity_of(fuel.id), 50);
    }

    #[test]
    fn test_same_company_moves_are_free() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        let mut a = hauler("VS-001", "alpha");
        let mut b = hauler("VS-002", "alpha");
        a.cargo.give(fuel.id, 100);

        let moved = f
            .sector
            .transfer(&mut a, &mut b, &mut f.companies, fuel, 60, &f.defaults);
        assert_eq!(moved, 60);
        assert_eq!(a.cargo.quantity_of(fuel.id), 40);
        assert_eq!(b.cargo.quantity_of(fuel.id), 60);
        assert_eq!(f.companies.get("alpha").unwrap().money(), 1_000_000);
    }

    #[test]
    fn test_cross_company_trade_pays_and_rewards() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        let mut seller = hauler("VS-001", "alpha");
        let mut buyer = hauler("VS-002", "beta");
        seller.cargo.give(fuel.id, 100);

        let moved = f
            .sector
            .transfer(&mut seller, &mut buyer, &mut f.companies, fuel, 10, &f.defaults);
        assert_eq!(moved, 10);

        let alpha = f.companies.get("alpha").unwrap();
        let beta = f.companies.get("beta").unwrap();
        assert_eq!(alpha.money(), 1_000_000 + 18_000);
        assert_eq!(beta.money(), 1_000_000 - 18_000);
        assert_eq!(alpha.reputation("beta"), TRADE_REPUTATION_GAIN);
        assert_eq!(beta.reputation("alpha"), TRADE_REPUTATION_GAIN);
    }

    #[test]
    fn test_trade_capped_by_buyer_money() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        f.companies.register(Company::new("gamma", "Gamma", 4_000));
        let mut seller = hauler("VS-001", "alpha");
        let mut buyer = hauler("VS-002", "gamma");
        seller.cargo.give(fuel.id, 100);

        // 4000 credits buy two units at 1800
        let moved = f
            .sector
            .transfer(&mut seller, &mut buyer, &mut f.companies, fuel, 10, &f.defaults);
        assert_eq!(moved, 2);
        assert_eq!(f.companies.get("gamma").unwrap().money(), 400);
    }

    #[test]
    fn test_trade_capped_by_destination_space() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        let mut seller = hauler("VS-001", "alpha");
        let mut buyer = hauler("VS-002", "beta");
        seller.cargo.give(fuel.id, 400);
        buyer.cargo.give(fuel.id, 390);

        let moved = f
            .sector
            .transfer(&mut seller, &mut buyer, &mut f.companies, fuel, 50, &f.defaults);
        assert_eq!(moved, 10);
        assert_eq!(seller.cargo.quantity_of(fuel.id), 390);
        assert_eq!(buyer.cargo.quantity_of(fuel.id), 400);
    }

    #[test]
    fn test_worthless_goods_move_without_payment() {
        let catalog = ResourceCatalog::from_json(
            r#"[{ "identifier": "scrap", "name": "Scrap" }]"#,
        )
        .unwrap();
        let defaults = DefaultPriceBook::new(&catalog);
        let scrap = catalog.get("scrap").unwrap();
        let mut sector = Sector::new(OrbitParameters::new("kestrel", 3, 0));
        let mut companies = CompanyRegistry::new();
        companies.register(Company::new("alpha", "Alpha", 0));
        companies.register(Company::new("beta", "Beta", 0));

        let mut seller = hauler("VS-001", "alpha");
        let mut buyer = hauler("VS-002", "beta");
        seller.cargo.give(scrap.id, 30);

        // Neither company has a credit, but a zero price caps nothing
        let moved = sector.transfer(&mut seller, &mut buyer, &mut companies, scrap, 30, &defaults);
        assert_eq!(moved, 30);
        assert_eq!(companies.get("alpha").unwrap().money(), 0);
        assert_eq!(companies.get("beta").unwrap().money(), 0);
    }

    #[test]
    fn test_trade_with_unregistered_company_is_rejected() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        let mut seller = hauler("VS-001", "alpha");
        let mut buyer = hauler("VS-002", "ghost");
        seller.cargo.give(fuel.id, 100);

        assert_eq!(
            f.sector
                .transfer(&mut seller, &mut buyer, &mut f.companies, fuel, 10, &f.defaults),
            0
        );
        assert_eq!(seller.cargo.quantity_of(fuel.id), 100);
    }

    #[test]
    fn test_requested_zero_moves_nothing() {
        let mut f = fixture();
        let fuel = f.catalog.get("fuel").unwrap();
        let mut a = hauler("VS-001", "alpha");
        let mut b = hauler("VS-002", "beta");
        a.cargo.give(fuel.id, 100);

        assert_eq!(
            f.sector
                .transfer(&mut a, &mut b, &mut f.companies, fuel, 0, &f.defaults),
            0
        );
        assert_eq!(f.companies.get("beta").unwrap().money(), 1_000_000);
    }
}
