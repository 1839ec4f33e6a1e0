//! Performance benchmarks for envbind loading, export, and report passes.
//!
//! Run with: `cargo bench -p envbind`

#![allow(unused, dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use envbind::{EnvBind, MapProvider};

fn main() {
    divan::main();
}

fn small_provider() -> MapProvider {
    MapProvider::new()
        .set("SMALL_HOST", "localhost")
        .set("SMALL_PORT", "8080")
        .set("SMALL_DEBUG", "true")
}

fn mixed_provider() -> MapProvider {
    MapProvider::new()
        .set("MIXED_NAME", "bench")
        .set("MIXED_WORKERS", "4")
        .set("MIXED_TIMEOUT", "30s")
        .set("MIXED_RATE", "0.75")
        .set("MIXED_HOSTS", "a.example.com,b.example.com,c.example.com")
        .set("MIXED_WEIGHTS", "a:1,b:2,c:3")
        .set("MIXED_DB_HOST", "db.example.com")
        .set("MIXED_DB_PORT", "5432")
}

#[derive(EnvBind, Default)]
struct SmallConfig {
    #[env("SMALL_HOST")]
    host: String,

    #[env("SMALL_PORT")]
    port: u16,

    #[env("SMALL_DEBUG")]
    debug: bool,
}

#[derive(EnvBind, Default)]
struct DbConfig {
    #[env("MIXED_DB_HOST,required")]
    host: String,

    #[env("MIXED_DB_PORT")]
    port: u16,
}

#[derive(EnvBind, Default)]
struct MixedConfig {
    #[env("MIXED_NAME,report")]
    name: String,

    #[env("MIXED_WORKERS")]
    workers: u32,

    #[env("MIXED_TIMEOUT")]
    timeout: Duration,

    #[env("MIXED_RATE")]
    rate: f64,

    #[env("MIXED_HOSTS")]
    hosts: Vec<String>,

    #[env("MIXED_WEIGHTS")]
    weights: HashMap<String, u32>,

    #[env(nested)]
    db: DbConfig,
}

#[divan::bench]
fn load_small(bencher: divan::Bencher) {
    let provider = small_provider();

    bencher.bench_local(|| {
        let mut config = SmallConfig::default();
        envbind::load_from(&mut config, &provider).unwrap();
        config
    });
}

#[divan::bench]
fn load_mixed(bencher: divan::Bencher) {
    let provider = mixed_provider();

    bencher.bench_local(|| {
        let mut config = MixedConfig::default();
        envbind::load_from(&mut config, &provider).unwrap();
        config
    });
}

#[divan::bench]
fn export_mixed(bencher: divan::Bencher) {
    let provider = mixed_provider();
    let mut config = MixedConfig::default();
    envbind::load_from(&mut config, &provider).unwrap();

    bencher.bench_local(|| envbind::to_env(&config));
}

#[divan::bench]
fn report_mixed(bencher: divan::Bencher) {
    let provider = mixed_provider();
    let mut config = MixedConfig::default();
    envbind::load_from(&mut config, &provider).unwrap();

    bencher.bench_local(|| envbind::report_to_string(&config));
}
