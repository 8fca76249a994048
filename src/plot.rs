use super::config::Config;
use super::error::RenderError;
use super::min_and_max;
use super::series::DoseSeries;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

const SERIES1_COLOR: RGBColor = RGBColor(0, 128, 0);
const SERIES2_COLOR: RGBColor = RGBColor(128, 0, 128);
const AXIS1_COLOR: RGBColor = RGBColor(0, 0, 255);
const SIZE: (u32, u32) = (1000, 600);

/// Shared x axis of the two series: labels in order of first appearance,
/// series one first, then the labels only present in series two.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    pub labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryAxis {
    pub fn join(s1: &DoseSeries, s2: &DoseSeries) -> CategoryAxis {
        let mut axis = CategoryAxis {
            labels: Vec::with_capacity(s1.len().max(s2.len())),
            index: HashMap::new(),
        };
        for label in s1.labels.iter().chain(s2.labels.iter()) {
            if !axis.index.contains_key(label) {
                axis.index.insert(label.clone(), axis.labels.len());
                axis.labels.push(label.clone());
            }
        }
        axis
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// position of each point of the series on this axis
    pub fn points(&self, series: &DoseSeries) -> Vec<(usize, f64)> {
        series
            .iter()
            .filter_map(|(label, dose)| self.index.get(label).map(|&i| (i, dose)))
            .collect()
    }

    /// Runs of consecutive finite points, in row order.
    /// NAN and infinite doses end a run and show up as gaps in the line.
    pub fn segments(&self, series: &DoseSeries) -> Vec<Vec<(usize, f64)>> {
        let mut segments: Vec<Vec<(usize, f64)>> = Vec::new();
        let mut current: Vec<(usize, f64)> = Vec::new();
        for (x, dose) in self.points(series) {
            if dose.is_finite() {
                current.push((x, dose));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// every `step`-th category, starting from the first
    pub fn ticks(&self, step: usize) -> Vec<usize> {
        (0..self.len()).step_by(step.max(1)).collect()
    }

    /// "Dosis de Medicamentos de <first month> a <last month>",
    /// where the month is the first word of a label.
    pub fn title(&self) -> String {
        let month = |l: &String| l.split_whitespace().next().map(String::from);
        match (
            self.labels.first().and_then(month),
            self.labels.last().and_then(month),
        ) {
            (Some(first), Some(last)) => {
                format!("Dosis de Medicamentos de {} a {}", first, last)
            }
            _ => String::from("Dosis de Medicamentos"),
        }
    }
}

/// y range with 10% margin of the span on each side,
/// taken over the finite doses only
pub fn y_range(doses: &[f64]) -> Range<f64> {
    let finite: Vec<f64> = doses.iter().copied().filter(|d| d.is_finite()).collect();
    match min_and_max(&finite[..]) {
        Some((ymin, ymax)) if ymax > ymin && (ymax - ymin).is_finite() => {
            let yspan = (ymax - ymin) / 10f64;
            (ymin - yspan)..(ymax + yspan)
        }
        Some((ymin, ymax)) if ymax > ymin => ymin..ymax,
        Some((y, _)) => (y - 1.)..(y + 1.),
        None => 0f64..1f64,
    }
}

/// Plots the two series to png at the config plot path:
/// series one solid against the left axis, series two dashed against the right axis.
pub fn render(config: &Config, s1: &DoseSeries, s2: &DoseSeries) -> Result<(), RenderError> {
    std::fs::create_dir_all(&config.output_dir).map_err(|e| RenderError::OutputDir {
        path: config.output_dir.clone(),
        source: e,
    })?;
    let fout = config.plot_path();
    draw_chart(config, s1, s2, &fout).map_err(|e| RenderError::Draw {
        path: fout.clone(),
        reason: e.to_string(),
    })?;
    log::info!("plot saved to {}", fout.display());
    Ok(())
}

fn draw_chart(
    config: &Config,
    s1: &DoseSeries,
    s2: &DoseSeries,
    fout: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let axis = CategoryAxis::join(s1, s2);
    let ticks = axis.ticks(config.tick_step);
    let xmax = axis.len().max(1);
    let name1 = &config.sources[0].name;
    let name2 = &config.sources[1].name;
    let title = match &config.title {
        Some(t) => t.clone(),
        None => axis.title(),
    };

    let root = BitMapBackend::new(fout, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(
            (0..xmax).with_key_points(ticks.clone()),
            y_range(&s1.doses),
        )?
        .set_secondary_coord(0..xmax, y_range(&s2.doses));

    let label_at = |x: &usize| axis.labels.get(*x).cloned().unwrap_or_default();
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
        .set_all_tick_mark_size(4)
        .x_labels(ticks.len().max(1))
        .x_label_formatter(&label_at)
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_formatter(&|y: &f64| format!("{:.1}", y))
        .x_desc("Fecha [Mes]")
        .y_desc(format!("Dosis de {} [mg]", name1))
        .axis_desc_style(("sans-serif", 16).into_font().color(&AXIS1_COLOR))
        .draw()?;
    chart
        .configure_secondary_axes()
        .x_label_formatter(&|_: &usize| String::new())
        .y_label_formatter(&|y: &f64| format!("{:.1}", y))
        .y_desc(format!("Dosis de {} [mg]", name2))
        .axis_desc_style(("sans-serif", 16).into_font().color(&SERIES2_COLOR))
        .draw()?;

    // one line per run of finite doses, the legend entry goes on the first
    for (i, segment) in with_one_segment(axis.segments(s1)).into_iter().enumerate() {
        let anno =
            chart.draw_series(LineSeries::new(segment, SERIES1_COLOR.stroke_width(2)))?;
        if i == 0 {
            anno.label(name1.as_str()).legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], SERIES1_COLOR.stroke_width(2))
            });
        }
    }
    for (i, segment) in with_one_segment(axis.segments(s2)).into_iter().enumerate() {
        let anno = if segment.is_empty() {
            chart.draw_secondary_series(LineSeries::new(segment, SERIES2_COLOR.stroke_width(2)))?
        } else {
            chart.draw_secondary_series(DashedLineSeries::new(
                segment,
                8,
                5,
                SERIES2_COLOR.stroke_width(2),
            ))?
        };
        if i == 0 {
            anno.label(name2.as_str()).legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], SERIES2_COLOR.stroke_width(2))
            });
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// keeps an (empty) line for series without finite doses so it still gets a legend entry
fn with_one_segment(mut segments: Vec<Vec<(usize, f64)>>) -> Vec<Vec<(usize, f64)>> {
    if segments.is_empty() {
        segments.push(Vec::new());
    }
    segments
}
