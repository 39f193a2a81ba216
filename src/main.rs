use ipv6flags::{read_addresses, AddressRecord, Config, Output};
use log::{debug, error, info};
use serde::Serialize;
use std::process;

#[derive(Serialize)]
struct Document<'a> {
    address: &'a [AddressRecord],
}

fn main() {
    env_logger::init();

    let filename = std::env::args().nth(1).unwrap_or_default();
    if let Err(e) = run(&filename) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse(filename)?;
    debug!("{:?}", config);

    let records = read_addresses(&config.source, &config.decode)?
        .into_iter()
        .filter(|record| config.selects(record))
        .collect::<Vec<_>>();

    info!(
        "decoded {} addresses from {}",
        records.len(),
        config.source.display()
    );

    match config.output {
        Output::Text => {
            for record in &records {
                print!("{}", record);
            }
        }
        Output::Toml => print!("{}", toml::to_string(&Document { address: &records })?),
    }

    Ok(())
}
