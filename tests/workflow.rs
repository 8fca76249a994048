use std::collections::HashMap;
use std::path::Path;

use doseplot::config::{Config, SourceDescriptor};
use doseplot::error::{Error, FetchError, ParseError};
use doseplot::fetch::{download_url, Response, Transport};

/// Serves fixed responses per url, 404 for anything else.
struct MapTransport {
    responses: HashMap<String, (u16, Vec<u8>)>,
}

impl Transport for MapTransport {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let (status, body) = self
            .responses
            .get(url)
            .cloned()
            .unwrap_or((404, Vec::new()));
        Ok(Response { status, body })
    }
}

fn dose_log(first_dose: f64, rows: usize) -> Vec<u8> {
    let mut csv = String::from("Mes,Dia,Dosis\n");
    for i in 0..rows {
        let (month, day) = if i < 7 {
            ("Octubre", 25 + i)
        } else {
            ("Noviembre", i - 6)
        };
        csv.push_str(&format!("{},{},{}\n", month, day, first_dose + i as f64 * 25.));
    }
    csv.into_bytes()
}

fn lookup(key: &str) -> Option<String> {
    match key {
        "A" => Some(String::from("id-a")),
        "B" => Some(String::from("id-b")),
        _ => None,
    }
}

fn test_config(root: &Path) -> Config {
    let mut config = Config::new(
        SourceDescriptor::new("A", None),
        SourceDescriptor::new("B", None),
    );
    config.data_dir = root.join("data");
    config.output_dir = root.join("output");
    config
}

#[test]
fn two_logs_produce_one_plot_and_no_working_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let mut responses = HashMap::new();
    responses.insert(download_url("id-a"), (200, dose_log(300., 14)));
    responses.insert(download_url("id-b"), (200, dose_log(50., 14)));
    let transport = MapTransport { responses };

    doseplot::run(&config, &transport, &lookup).unwrap();

    let plot = tmp.path().join("output").join("plot.png");
    assert!(plot.exists());
    assert!(std::fs::metadata(&plot).unwrap().len() > 0);
    assert!(!config.data_dir.exists());
}

#[test]
fn rerun_overwrites_plot() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    std::fs::create_dir_all(&config.output_dir).unwrap();
    std::fs::write(config.plot_path(), b"old").unwrap();
    let mut responses = HashMap::new();
    responses.insert(download_url("id-a"), (200, dose_log(1., 10)));
    responses.insert(download_url("id-b"), (200, dose_log(2., 3)));
    let transport = MapTransport { responses };

    doseplot::run(&config, &transport, &lookup).unwrap();

    assert_ne!(std::fs::read(config.plot_path()).unwrap(), b"old".to_vec());
}

#[test]
fn failed_download_fails_at_parse_and_still_cleans_up() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let mut responses = HashMap::new();
    responses.insert(download_url("id-a"), (200, dose_log(300., 14)));
    let transport = MapTransport { responses };

    let err = doseplot::run(&config, &transport, &lookup).unwrap_err();

    assert!(matches!(err, Error::Parse(ParseError::Csv { .. })));
    assert!(err.to_string().contains("doses_B.csv"));
    assert!(!config.plot_path().exists());
    assert!(!config.data_dir.exists());
}

#[test]
fn nan_and_infinite_doses_plot_as_gaps() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let mut responses = HashMap::new();
    responses.insert(
        download_url("id-a"),
        (200, b"Mes,Dia,Dosis\nOctubre,1,nan\nOctubre,2,300\nOctubre,3,325\n".to_vec()),
    );
    responses.insert(
        download_url("id-b"),
        (200, b"Mes,Dia,Dosis\nOctubre,1,50\nOctubre,2,inf\nOctubre,3,75\n".to_vec()),
    );
    let transport = MapTransport { responses };

    doseplot::run(&config, &transport, &lookup).unwrap();

    assert!(config.plot_path().exists());
    assert!(!config.data_dir.exists());
}
