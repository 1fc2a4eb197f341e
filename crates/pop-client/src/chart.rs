//! Bar chart specification for one selected year
//!
//! The serialized form is a Chart.js configuration: a horizontal bar chart
//! with one `Population` dataset, on-bar data labels (chartjs-plugin-datalabels)
//! and titled axes.

use crate::dataset::Dataset;
use serde::Serialize;
use serde_json::{json, Value};

/// Bar colours, assigned by sorted position and repeated when exhausted
pub const PALETTE: [&str; 15] = [
    "#F39C12", "#E67E22", "#E74C3C", "#9B59B6", "#8E44AD", "#16A085", "#1ABC9C", "#2ECC71",
    "#27AE60", "#2C3E50", "#F39C12", "#F1C40F", "#E74C3C", "#E67E22", "#D35400",
];

const DATASET_LABEL: &str = "Population";

/// A complete chart configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: &'static str,

    /// Year the bars describe
    #[serde(skip)]
    pub year: i32,

    pub data: ChartData,

    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Country names, largest population first
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: String,
    pub data: Vec<i64>,
    pub background_color: Vec<String>,
    pub border_width: u32,
}

/// One drawn bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar<'a> {
    pub label: &'a str,
    pub value: i64,
    pub color: &'a str,
}

impl ChartSpec {
    /// Bars in display order
    pub fn bars(&self) -> impl Iterator<Item = Bar<'_>> {
        let dataset = self.data.datasets.first();
        self.data.labels.iter().enumerate().map(move |(i, label)| Bar {
            label,
            value: dataset.and_then(|d| d.data.get(i)).copied().unwrap_or(0),
            color: dataset
                .and_then(|d| d.background_color.get(i))
                .map(String::as_str)
                .unwrap_or(PALETTE[i % PALETTE.len()]),
        })
    }

    /// Largest bar value, 0 for an empty chart
    pub fn max_value(&self) -> i64 {
        self.bars().map(|b| b.value).max().unwrap_or(0)
    }
}

/// Build the chart for `year`.
///
/// Every country in the dataset gets a bar; a country without a record for
/// `year` is drawn and sorted as 0. The sort is stable, so equal values keep
/// first-appearance order.
pub fn build_chart(dataset: &Dataset, year: i32) -> ChartSpec {
    let mut bars: Vec<(&str, i64)> = dataset
        .countries()
        .iter()
        .map(|country| {
            let value = dataset.population(year, country).unwrap_or(0);
            (country.as_str(), value)
        })
        .collect();
    bars.sort_by(|a, b| b.1.cmp(&a.1));

    let labels = bars.iter().map(|(country, _)| country.to_string()).collect();
    let data = bars.iter().map(|(_, value)| *value).collect();
    let background_color = (0..bars.len())
        .map(|i| PALETTE[i % PALETTE.len()].to_string())
        .collect();

    ChartSpec {
        chart_type: "bar",
        year,
        data: ChartData {
            labels,
            datasets: vec![BarDataset {
                label: DATASET_LABEL.to_string(),
                data,
                background_color,
                border_width: 1,
            }],
        },
        options: chart_options(),
    }
}

fn chart_options() -> Value {
    json!({
        "indexAxis": "y",
        "plugins": {
            "datalabels": {
                "color": "white",
                "anchor": "end",
                "align": "start",
                "offset": 10,
                "font": { "size": 12 }
            }
        },
        "scales": {
            "x": {
                "title": { "display": true, "text": "Population" },
                "beginAtZero": true
            },
            "y": {
                "title": { "display": true, "text": "Country" },
                "ticks": { "autoSkip": false, "maxRotation": 0, "minRotation": 0 }
            }
        },
        "animation": { "duration": 1000, "easing": "easeInOutQuart" }
    })
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
