use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use moonphase_rust::config::PhaseConfig;
use moonphase_rust::{api, catalog, PhaseTable, Resolver};

const USAGE: &str = "\
Usage:
  moon-phase date <YYYY-MM-DD> [TIMEZONE]
  moon-phase instant <RFC3339> [TIMEZONE]
  moon-phase range <START> <END> [TIMEZONE]
  moon-phase id <N>
  moon-phase version";

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{}", USAGE);
    };

    let config = PhaseConfig::from_default_location()
        .context("Failed to load moonphase.toml")?
        .unwrap_or_default();
    let custom_table = match &config.dataset.path {
        Some(_) => Some(config.load_table().context("Failed to load phase dataset")?),
        None => None,
    };
    let table = match &custom_table {
        Some(table) => table,
        None => PhaseTable::shared().context("Failed to load phase dataset")?,
    };
    let resolver = Resolver::new(table);
    let timezone_arg = |index: usize| -> String {
        args.get(index)
            .cloned()
            .unwrap_or_else(|| config.lookup.default_timezone.clone())
    };

    match command.as_str() {
        "date" => {
            let date = parse_date(args.get(1).context("Missing date argument")?)?;
            print_json(&resolver.resolve_date(date, &timezone_arg(2))?)
        }
        "instant" => {
            let raw = args.get(1).context("Missing instant argument")?;
            let instant = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid RFC 3339 instant '{}'", raw))?
                .with_timezone(&Utc);
            print_json(&resolver.resolve_instant(instant, &timezone_arg(2))?)
        }
        "range" => {
            let start = parse_date(args.get(1).context("Missing start date")?)?;
            let end = parse_date(args.get(2).context("Missing end date")?)?;
            print_json(&resolver.phases_in_range(start, end, &timezone_arg(3))?)
        }
        "id" => {
            let id: i64 = args
                .get(1)
                .context("Missing id argument")?
                .parse()
                .context("Id must be an integer")?;
            println!("{}", catalog::for_id(id).unwrap_or(catalog::NOT_FOUND));
            Ok(())
        }
        "version" => print_json(&api::version()?),
        other => bail!("Unknown command '{}'\n{}", other, USAGE),
    }
}
