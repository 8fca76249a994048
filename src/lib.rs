use std::path::PathBuf;
pub mod clean;
pub mod config;
pub mod error;
pub mod fetch;
pub mod plot;
pub mod series;

use config::Config;
use error::Error;
use fetch::Transport;
use series::DoseSeries;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DOWNLOAD_URL: &str = "https://drive.google.com/uc";

pub const COL_MONTH: &str = "Mes";
pub const COL_DAY: &str = "Dia";
pub const COL_DOSE: &str = "Dosis";

pub const DEFAULT_TICK_STEP: usize = 7;

/// Runs the whole workflow once: fetch both logs, parse them,
/// plot them together, and remove the working directory.
/// Download failures are logged and left for the parser to trip on;
/// the working directory is removed even when parsing or plotting fails.
pub fn run(
    config: &Config,
    transport: &dyn Transport,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    for source in config.sources.iter() {
        if let Err(e) = fetch::fetch(transport, lookup, source, &config.data_dir) {
            log::error!("failed to download {}: {}", source.filename, e);
        }
    }
    let result = parse_and_plot(config);
    clean::remove_folder(&config.data_dir);
    result
}

fn parse_and_plot(config: &Config) -> Result<(), Error> {
    let paths: Vec<PathBuf> = config
        .sources
        .iter()
        .map(|s| config.data_path(s))
        .collect();
    let s1 = DoseSeries::from_csv(&paths[0], &config.columns)?;
    log::debug!("{}: {} doses\n{}", config.sources[0].name, s1.len(), s1);
    let s2 = DoseSeries::from_csv(&paths[1], &config.columns)?;
    log::debug!("{}: {} doses\n{}", config.sources[1].name, s2.len(), s2);
    if s1.len() != s2.len() {
        log::warn!(
            "{} has {} doses and {} has {}, plotting on the joined dates",
            config.sources[0].name,
            s1.len(),
            config.sources[1].name,
            s2.len()
        );
    }
    plot::render(config, &s1, &s2)?;
    Ok(())
}

/// min and max of a slice, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}
