//! Tab-separated prediction and metric tables
//!
//! The external framework writes one row per slice with a `proba_*` column
//! per class; this module reads that shape back and writes the subject-level
//! tables in the same convention. Structural defects are reported with file
//! and line context, never skipped.

use crate::error::{Error, Result};
use crate::label::LabelCode;
use crate::metrics::{GroundTruth, MetricSet};
use crate::prediction::{SliceAxis, SlicePosition, SlicePrediction, SubjectAggregate};
use std::path::Path;

/// A parsed slice-prediction table: predictions plus per-row raw labels
#[derive(Clone, Debug)]
pub struct PredictionTable {
    /// One prediction per row, in file order
    pub predictions: Vec<SlicePrediction>,
    /// Raw ground-truth label of each row, parallel to `predictions`
    pub labels: Vec<String>,
    /// Class count inferred from the `proba_*` columns
    pub n_classes: usize,
}

impl PredictionTable {
    /// Label code inferred from the observed raw labels
    pub fn infer_label_code(&self) -> Result<LabelCode> {
        LabelCode::infer(&self.labels)
    }

    /// Ground-truth map for the table's subjects under a label code
    pub fn ground_truth(&self, code: &LabelCode) -> Result<GroundTruth> {
        GroundTruth::from_rows(
            self.predictions.iter().zip(&self.labels).map(|(p, l)| {
                (
                    p.participant_id.as_str(),
                    p.session_id.as_str(),
                    l.as_str(),
                )
            }),
            code,
        )
    }
}

const FIXED_COLUMNS: [&str; 5] = [
    "participant_id",
    "session_id",
    "axis",
    "slice_index",
    "true_label",
];

/// Read a slice-prediction table
///
/// Expected header: `participant_id`, `session_id`, `axis`, `slice_index`,
/// `true_label`, then `proba_0` .. `proba_{C-1}` in order.
pub fn read_slice_predictions(path: &Path) -> Result<PredictionTable> {
    let display = path.display().to_string();
    let malformed = |line: u64, reason: String| Error::MalformedTable {
        path: display.clone(),
        line,
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| from_csv(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| malformed(1, format!("unreadable header: {e}")))?
        .clone();
    let mut columns = headers.iter();
    for expected in FIXED_COLUMNS {
        match columns.next() {
            Some(found) if found == expected => {}
            Some(found) => {
                return Err(malformed(
                    1,
                    format!("expected column '{expected}', found '{found}'"),
                ))
            }
            None => return Err(malformed(1, format!("missing column '{expected}'"))),
        }
    }
    let mut n_classes = 0;
    for found in columns {
        let expected = format!("proba_{n_classes}");
        if found != expected {
            return Err(malformed(
                1,
                format!("expected column '{expected}', found '{found}'"),
            ));
        }
        n_classes += 1;
    }
    if n_classes == 0 {
        return Err(malformed(1, "no proba_* columns".to_string()));
    }

    let mut predictions = Vec::new();
    let mut labels = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| malformed(0, format!("unreadable row: {e}")))?;
        let line = row.position().map_or(0, csv::Position::line);
        if row.len() != FIXED_COLUMNS.len() + n_classes {
            return Err(malformed(
                line,
                format!(
                    "expected {} fields, found {}",
                    FIXED_COLUMNS.len() + n_classes,
                    row.len()
                ),
            ));
        }
        let axis: SliceAxis = row[2]
            .parse()
            .map_err(|e: String| malformed(line, e))?;
        let slice_index: usize = row[3]
            .parse()
            .map_err(|_| malformed(line, format!("unparsable slice index '{}'", &row[3])))?;
        let mut probabilities = Vec::with_capacity(n_classes);
        for field in row.iter().skip(FIXED_COLUMNS.len()) {
            let p: f64 = field
                .parse()
                .map_err(|_| malformed(line, format!("unparsable probability '{field}'")))?;
            probabilities.push(p);
        }
        predictions.push(SlicePrediction::new(
            &row[0],
            &row[1],
            SlicePosition::new(axis, slice_index),
            probabilities,
        ));
        labels.push(row[4].to_string());
    }

    Ok(PredictionTable {
        predictions,
        labels,
        n_classes,
    })
}

/// Write the subject-level prediction table
///
/// Columns: `participant_id`, `session_id`, `true_label`, `predicted_label`,
/// then one `proba_*` column per class.
pub fn write_subject_predictions(
    path: &Path,
    aggregates: &[SubjectAggregate],
    truth: &GroundTruth,
    code: &LabelCode,
) -> Result<()> {
    let n_classes = code.class_count();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| from_csv(path, e))?;

    let mut header = vec![
        "participant_id".to_string(),
        "session_id".to_string(),
        "true_label".to_string(),
        "predicted_label".to_string(),
    ];
    for class in 0..n_classes {
        header.push(format!("proba_{class}"));
    }
    writer.write_record(&header).map_err(|e| from_csv(path, e))?;

    for aggregate in aggregates {
        let true_class = truth.class_of(&aggregate.participant_id, &aggregate.session_id)?;
        let mut row = vec![
            aggregate.participant_id.clone(),
            aggregate.session_id.clone(),
            class_name(code, true_class),
            class_name(code, aggregate.predicted_class),
        ];
        for &p in &aggregate.probabilities {
            row.push(format!("{p}"));
        }
        writer.write_record(&row).map_err(|e| from_csv(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a metric table, one row per evaluation level
pub fn write_metrics(path: &Path, rows: &[(&str, &MetricSet)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| from_csv(path, e))?;
    writer
        .write_record([
            "level",
            "accuracy",
            "balanced_accuracy",
            "sensitivity",
            "specificity",
            "ppv",
            "npv",
            "n_samples",
        ])
        .map_err(|e| from_csv(path, e))?;
    for (level, metrics) in rows {
        writer
            .write_record([
                (*level).to_string(),
                format!("{}", metrics.accuracy),
                format!("{}", metrics.balanced_accuracy),
                format!("{}", metrics.sensitivity),
                format!("{}", metrics.specificity),
                format!("{}", metrics.ppv),
                format!("{}", metrics.npv),
                format!("{}", metrics.n_samples),
            ])
            .map_err(|e| from_csv(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

fn class_name(code: &LabelCode, class: usize) -> String {
    code.canonical_name(class)
        .map_or_else(|| format!("class-{class}"), str::to_string)
}

fn from_csv(path: &Path, e: csv::Error) -> Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::MalformedTable {
            path: path.display().to_string(),
            line: 0,
            reason: format!("{other:?}"),
        },
    }
}
