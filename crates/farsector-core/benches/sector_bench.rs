//! Benchmarks for the sector economy hot paths.
//!
//! Transfers, price lookups and battle assessment are the operations
//! outer layers call every tick, so each is tracked per call.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use farsector_core::persistence::{load_world, save_world};
use farsector_core::prelude::*;

fn hauler_description() -> SpacecraftDescription {
    SpacecraftDescription::new("kite-hauler", "Kite Hauler", SpacecraftKind::Ship)
        .with_cargo(4, 100)
}

fn trading_world() -> World {
    let mut world = World::new();
    world.register_company(Company::new("alpha", "Alpha Haulage", 10_000_000));
    world.register_sector(Sector::new(OrbitParameters::new("kestrel", 3, 0)));
    world.register_spacecraft(Spacecraft::new(
        "VS-001",
        "alpha",
        "kestrel-3-0",
        hauler_description(),
    ));
    world.register_spacecraft(Spacecraft::new(
        "VS-002",
        "alpha",
        "kestrel-3-0",
        hauler_description(),
    ));
    world
}

fn battle_world(ships_per_side: usize) -> World {
    let mut world = World::new();
    world.register_company(Company::new("alpha", "Alpha", 0));
    world.register_company(Company::new("beta", "Beta", 0));
    world.companies_mut().declare_war("alpha", "beta");
    world.register_sector(Sector::new(OrbitParameters::new("kestrel", 3, 0)));

    for index in 0..ships_per_side {
        world.register_spacecraft(Spacecraft::new(
            format!("VS-A-{:02}", index),
            "alpha",
            "kestrel-3-0",
            hauler_description(),
        ));
        world.register_spacecraft(Spacecraft::new(
            format!("VS-B-{:02}", index),
            "beta",
            "kestrel-3-0",
            hauler_description(),
        ));
    }
    world
}

fn bench_transfer_pair(c: &mut Criterion) {
    let mut world = trading_world();
    let fuel = world.catalog().get("fuel").unwrap().clone();
    world
        .spacecraft_mut("VS-001")
        .unwrap()
        .cargo
        .give(fuel.id, 200);

    c.bench_function("transfer_pair", |b| {
        b.iter(|| {
            // Shuttle the same load back and forth, net zero per iteration
            world.transfer(black_box("VS-001"), black_box("VS-002"), &fuel, 10);
            world.transfer(black_box("VS-002"), black_box("VS-001"), &fuel, 10);
        });
    });
}

fn bench_price_queries(c: &mut Criterion) {
    let catalog = ResourceCatalog::standard();
    let defaults = DefaultPriceBook::new(&catalog);
    let mut sector = Sector::new(OrbitParameters::new("kestrel", 3, 0));

    c.bench_function("price_full_catalog", |b| {
        b.iter(|| {
            let mut total = 0u64;
            for resource in catalog.iter() {
                total += sector.prices.price(
                    black_box(resource),
                    PriceContext::FactoryInput,
                    &defaults,
                );
            }
            black_box(total)
        });
    });
}

fn bench_battle_assessment(c: &mut Criterion) {
    let world = battle_world(20);

    c.bench_function("battle_state_40_ships", |b| {
        b.iter(|| {
            let state = world.sector_battle_state(black_box("kestrel-3-0"), black_box("alpha"));
            black_box(state)
        });
    });
}

fn bench_save_load(c: &mut Criterion) {
    let world = battle_world(20);
    let catalog = ResourceCatalog::standard();

    c.bench_function("save_load_40_ships", |b| {
        b.iter(|| {
            let mut buffer = Vec::new();
            save_world(&mut buffer, black_box(&world)).expect("save failed");
            let restored = load_world(&buffer[..], catalog.clone()).expect("load failed");
            black_box(restored)
        });
    });
}

criterion_group!(
    benches,
    bench_transfer_pair,
    bench_price_queries,
    bench_battle_assessment,
    bench_save_load
);
criterion_main!(benches);
