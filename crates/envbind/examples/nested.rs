//! Example: nested configuration trees and missing-required aggregation.
//!
//! Every missing required variable across the whole tree is reported in one
//! message:
//!   cargo run --package envbind --example nested
#![allow(unused, dead_code)]

use envbind::EnvBind;

#[derive(EnvBind, Default)]
struct DatabaseSettings {
    #[env("DB_HOST,required")]
    host: String,

    #[env("DB_PORT,report")]
    port: u16,
}

#[derive(EnvBind, Default)]
struct AppConfig {
    #[env("APP_NAME,required,report")]
    name: String,

    #[env(nested)]
    database: DatabaseSettings,

    // Allocated via Default before recursion, so DB settings bind even
    // when the caller left this unset.
    #[env(nested)]
    replica: Option<DatabaseSettings>,
}

fn main() {
    let mut config = AppConfig::default();

    match envbind::load(&mut config) {
        Ok(()) => {
            println!("loaded {}", config.name);
            envbind::write_report(&config, &mut std::io::stdout()).ok();
        }

        Err(e) => {
            eprintln!("{:?}", envbind::miette::Report::from(e));
            std::process::exit(1);
        }
    }
}
