use super::config::Columns;
use super::error::ParseError;
use std::path::Path;

/// The dose time series of one medicine, in file row order.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseSeries {
    pub labels: Vec<String>,
    pub doses: Vec<f64>,
}

impl DoseSeries {
    pub fn new(capacity: usize) -> DoseSeries {
        let labels: Vec<String> = Vec::with_capacity(capacity);
        let doses: Vec<f64> = Vec::with_capacity(capacity);
        DoseSeries { labels, doses }
    }

    /// Init a DoseSeries from a csv with header,
    /// labelling each row as "<month> <day>" and reading the dose as f64.
    /// Any bad row fails the whole file; nothing is skipped or reordered.
    pub fn from_csv(fin: &Path, columns: &Columns) -> Result<DoseSeries, ParseError> {
        let csv_err = |e: csv::Error| ParseError::Csv {
            path: fin.to_path_buf(),
            source: e,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(fin)
            .map_err(csv_err)?;
        let headers = reader.headers().map_err(csv_err)?.clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| ParseError::MissingColumn {
                    path: fin.to_path_buf(),
                    column: column.to_string(),
                })
        };
        let month_col = position(&columns.month)?;
        let day_col = position(&columns.day)?;
        let dose_col = position(&columns.dose)?;

        let mut series = DoseSeries::new(256);
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(csv_err)?;
            // equal record lengths are enforced by the reader, so the columns exist
            let month = record.get(month_col).unwrap_or_default();
            let day = record.get(day_col).unwrap_or_default();
            let dose_str = record.get(dose_col).unwrap_or_default();
            let dose = dose_str
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidDose {
                    path: fin.to_path_buf(),
                    row: i + 1,
                    value: dose_str.to_string(),
                })?;
            series.labels.push(format!("{} {}", month, day));
            series.doses.push(dose);
        }
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// (label, dose) pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.doses.iter().copied())
    }
}

impl std::fmt::Display for DoseSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "date, dose [mg]")?;
        for (label, dose) in self.iter() {
            writeln!(f, "{},{}", label, dose)?
        }
        Ok(())
    }
}
