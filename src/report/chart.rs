// Chart.js configuration for the rebased sector chart.
use crate::model::ReportPayload;
use serde_json::{Value, json};

/// One distinguishable color per sector.
const PALETTE: [&str; 17] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000",
];

pub fn chart_config(payload: &ReportPayload) -> Value {
    let labels: Vec<String> = payload
        .sectors
        .values()
        .map(|report| report.series.dates.clone())
        .max_by_key(|dates| dates.len())
        .unwrap_or_default();

    let datasets: Vec<Value> = payload
        .sectors
        .values()
        .enumerate()
        .map(|(i, report)| {
            json!({
                "label": report.name,
                "data": report.series.values,
                "borderColor": PALETTE[i % PALETTE.len()],
                "borderWidth": 1.5,
                "pointRadius": 0,
                "tension": 0.1,
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": { "labels": labels, "datasets": datasets },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "interaction": { "mode": "nearest", "intersect": false },
            "plugins": { "legend": { "position": "bottom", "labels": { "boxWidth": 12 } } },
            "scales": { "y": { "title": { "display": true, "text": "指数 (期初=100)" } } }
        }
    })
}
