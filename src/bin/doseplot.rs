use doseplot::config::parse_cli;
use doseplot::fetch::UreqTransport;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = parse_cli()?;
    log::info!(
        "plotting {} and {} to {}",
        config.sources[0].name,
        config.sources[1].name,
        config.plot_path().display()
    );
    let lookup = |key: &str| std::env::var(key).ok();
    doseplot::run(&config, &UreqTransport, &lookup)?;
    Ok(())
}
