//! Example: `SecretString` fields stay protected in memory and the report
//! redacts them by default.
//!
//!   API_TOKEN=tok-123 DATABASE_URL=postgres://localhost cargo run \
//!     --package envbind --example secrecy_report --features secrecy
#![allow(unused, dead_code)]

use envbind::EnvBind;
use envbind::secrecy::{ExposeSecret, SecretString};

#[derive(EnvBind)]
struct Credentials {
    #[env("DATABASE_URL,report")]
    database_url: String,

    // No `report` flag: the report shows (OMITTED), and the value is
    // protected in Debug output by secrecy itself.
    #[env("API_TOKEN,required")]
    api_token: SecretString,
}

fn main() {
    // SecretString has no Default, so the tree starts from explicit values.
    let mut creds = Credentials {
        database_url: String::new(),
        api_token: SecretString::from(String::new()),
    };

    if let Err(e) = envbind::load(&mut creds) {
        eprintln!("{:?}", envbind::miette::Report::from(e));
        std::process::exit(1);
    }

    envbind::write_report(&creds, &mut std::io::stdout()).ok();

    // The secret is still reachable where it is genuinely needed.
    let _token = creds.api_token.expose_secret();
}
