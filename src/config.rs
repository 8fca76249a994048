use super::error::ConfigError;
use super::{COL_DAY, COL_DOSE, COL_MONTH, DEFAULT_TICK_STEP, VERSION};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

/// One remote dosage log: the medicine name shown on the chart,
/// the environment key holding its remote identifier, and the local file it is saved to.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDescriptor {
    pub name: String,
    pub key: String,
    pub filename: String,
}

impl SourceDescriptor {
    /// Uses the name as key when no explicit key is given.
    pub fn new(name: &str, key: Option<&str>) -> SourceDescriptor {
        SourceDescriptor {
            name: name.to_string(),
            key: key.unwrap_or(name).to_string(),
            filename: format!("doses_{}.csv", name),
        }
    }
}

/// CSV column names used to build each point.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    pub month: String,
    pub day: String,
    pub dose: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            month: COL_MONTH.to_string(),
            day: COL_DAY.to_string(),
            dose: COL_DOSE.to_string(),
        }
    }
}

/// Everything a run needs, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sources: [SourceDescriptor; 2],
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub plot_name: String,
    pub tick_step: usize,
    pub title: Option<String>,
    pub columns: Columns,
}

impl Config {
    /// Config with the default directories and layout for two medicines.
    pub fn new(first: SourceDescriptor, second: SourceDescriptor) -> Config {
        Config {
            sources: [first, second],
            data_dir: PathBuf::from("./data"),
            output_dir: PathBuf::from("./output"),
            plot_name: String::from("plot"),
            tick_step: DEFAULT_TICK_STEP,
            title: None,
            columns: Columns::default(),
        }
    }

    pub fn plot_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.png", self.plot_name))
    }

    pub fn data_path(&self, source: &SourceDescriptor) -> PathBuf {
        self.data_dir.join(&source.filename)
    }
}

/// Takes the CLI arguments (with env fallbacks for the medicine names) and builds the run config.
pub fn parse_cli() -> Result<Config, ConfigError> {
    let cli_args = build_cli().get_matches();
    config_from_matches(&cli_args)
}

fn build_cli() -> App<'static, 'static> {
    let arg_med1 = Arg::with_name("med1")
        .help("name of the first medicine, plotted on the left axis")
        .long("med1")
        .env("MED1")
        .takes_value(true)
        .required(true);
    let arg_med2 = Arg::with_name("med2")
        .help("name of the second medicine, plotted on the right axis")
        .long("med2")
        .env("MED2")
        .takes_value(true)
        .required(true);
    let arg_med1_key = Arg::with_name("med1_key")
        .help("env variable holding the remote id of the first log, defaults to the name")
        .long("med1-key")
        .takes_value(true);
    let arg_med2_key = Arg::with_name("med2_key")
        .help("env variable holding the remote id of the second log, defaults to the name")
        .long("med2-key")
        .takes_value(true);
    let arg_datadir = Arg::with_name("data_dir")
        .help("working directory for the downloaded csv files, removed at the end")
        .short("d")
        .long("datadir")
        .takes_value(true)
        .default_value("./data");
    let arg_outdir = Arg::with_name("output_dir")
        .help("directory of the output png")
        .short("o")
        .long("outdir")
        .takes_value(true)
        .default_value("./output");
    let arg_plotname = Arg::with_name("plot_name")
        .help("file stem of the output png")
        .short("p")
        .long("plotname")
        .takes_value(true)
        .default_value("plot");
    let arg_tickstep = Arg::with_name("tick_step")
        .help("label every n-th date on the x axis")
        .short("n")
        .long("tickstep")
        .takes_value(true)
        .default_value("7");
    let arg_title = Arg::with_name("title")
        .help("chart title, derived from the first and last month when omitted")
        .short("t")
        .long("title")
        .takes_value(true);
    let arg_month = Arg::with_name("month_col")
        .help("csv column with the month")
        .long("month-col")
        .takes_value(true)
        .default_value(COL_MONTH);
    let arg_day = Arg::with_name("day_col")
        .help("csv column with the day")
        .long("day-col")
        .takes_value(true)
        .default_value(COL_DAY);
    let arg_dose = Arg::with_name("dose_col")
        .help("csv column with the dose [mg]")
        .long("dose-col")
        .takes_value(true)
        .default_value(COL_DOSE);
    App::new("doseplot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to download and plot the dose time series of two medicines")
        .arg(arg_med1)
        .arg(arg_med2)
        .arg(arg_med1_key)
        .arg(arg_med2_key)
        .arg(arg_datadir)
        .arg(arg_outdir)
        .arg(arg_plotname)
        .arg(arg_tickstep)
        .arg(arg_title)
        .arg(arg_month)
        .arg(arg_day)
        .arg(arg_dose)
}

fn config_from_matches(cli_args: &ArgMatches) -> Result<Config, ConfigError> {
    let med1 = SourceDescriptor::new(
        cli_args.value_of("med1").unwrap_or_default(),
        cli_args.value_of("med1_key"),
    );
    let med2 = SourceDescriptor::new(
        cli_args.value_of("med2").unwrap_or_default(),
        cli_args.value_of("med2_key"),
    );
    let tick_str = cli_args.value_of("tick_step").unwrap_or_default();
    let tick_step = match tick_str.parse::<usize>() {
        Ok(n) if n > 0 => n,
        Ok(_) => {
            return Err(ConfigError::InvalidValue {
                arg: String::from("tickstep"),
                value: tick_str.to_string(),
                reason: String::from("must be at least 1"),
            })
        }
        Err(e) => {
            return Err(ConfigError::InvalidValue {
                arg: String::from("tickstep"),
                value: tick_str.to_string(),
                reason: e.to_string(),
            })
        }
    };
    let mut config = Config::new(med1, med2);
    config.data_dir = PathBuf::from(cli_args.value_of("data_dir").unwrap_or_default());
    config.output_dir = PathBuf::from(cli_args.value_of("output_dir").unwrap_or_default());
    config.plot_name = String::from(cli_args.value_of("plot_name").unwrap_or_default());
    config.tick_step = tick_step;
    config.title = cli_args.value_of("title").map(String::from);
    config.columns = Columns {
        month: String::from(cli_args.value_of("month_col").unwrap_or_default()),
        day: String::from(cli_args.value_of("day_col").unwrap_or_default()),
        dose: String::from(cli_args.value_of("dose_col").unwrap_or_default()),
    };
    Ok(config)
}
