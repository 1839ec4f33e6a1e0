//! Example: binding the process environment and printing the audit report.
//!
//! Run with missing vars to see the aggregated error:
//!   cargo run --package envbind --example basic
//!
//! Run with the required var set:
//!   `HOST_IP=10.0.0.1 PASSWORD=hunter2 cargo run --package envbind --example basic`
#![allow(unused, dead_code)]

use envbind::EnvBind;

#[derive(EnvBind, Default)]
struct HostInfo {
    #[env("HOST_IP,required,report")]
    ip: String,

    #[env("PASSWORD,noreport")]
    password: String,

    #[env("HOST_PORT,report")]
    port: u16,
}

fn main() {
    let mut hi = HostInfo {
        port: 80,
        ..HostInfo::default()
    };

    if let Err(e) = envbind::load(&mut hi) {
        // Use miette's Report for fancy error rendering
        eprintln!("{:?}", envbind::miette::Report::from(e));
        std::process::exit(1);
    }

    if let Err(e) = envbind::write_report(&hi, &mut std::io::stdout()) {
        eprintln!("{:?}", envbind::miette::Report::from(e));
        std::process::exit(1);
    }

    println!();
    println!("exported form:");
    for line in envbind::to_env(&hi) {
        println!("  {line}");
    }
}
