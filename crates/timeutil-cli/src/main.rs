mod cli;
mod logging;

use std::process;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use serde_json::{Map, Value};
use timeutil::{closest, fiscal, next, nth_weekday, previous, tz};
use tracing::info;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    tz::init();
    let zone = tz::resolve(&cli.tz).with_context(|| format!("resolving --tz '{}'", cli.tz))?;
    let today = || Utc::now().with_timezone(&zone).date_naive();

    match cli.command {
        Command::Nth(args) => {
            let date = args.date.unwrap_or_else(today);
            info!(%date, weekday = %args.weekday, n = args.count, direction = %args.direction, "seeking");
            print_date(nth_weekday(date, args.weekday, args.count, args.direction));
        }
        Command::Next(args) => print_date(next(args.date.unwrap_or_else(today), args.weekday)),
        Command::Previous(args) => {
            print_date(previous(args.date.unwrap_or_else(today), args.weekday))
        }
        Command::Closest(args) => {
            print_date(closest(args.date.unwrap_or_else(today), args.weekday))
        }
        Command::Fiscal(args) => {
            let date = args.date.unwrap_or_else(today);
            print_json(&fiscal::period(&date))?;
        }
        Command::Year(args) => {
            let year = fiscal::fiscal_year(args.year)
                .with_context(|| format!("building fiscal year {}", args.year))?;
            print_json(&year)?;
        }
        Command::Zones => {
            let zones: Map<String, Value> = tz::ZONES
                .iter()
                .map(|(name, zone)| (name.to_string(), Value::from(zone.name())))
                .collect();
            print_json(&zones)?;
        }
    }
    Ok(())
}

fn print_date(date: NaiveDate) {
    println!("{}", date.format("%Y-%m-%d"));
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}
