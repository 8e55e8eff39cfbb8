use crate::classify::Tagger;
use crate::dataset::{DatasetError, Table};
use crate::evaluation::{ConfusionMatrix, EvalError, RocCurve};
use crate::plot::{ClassSplitHistogram, ExportFormat};
use crate::utils::math::{two_proportion_z, two_sided_p_value};
use chrono::Utc;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TaskError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One-shot study comparing binary taggers on a labeled table.
///
/// Each tagger is scored against the truth column with the confusion-matrix
/// evaluator and a ROC sweep of its continuous discriminant. The score
/// column named in the config is additionally histogrammed split by truth,
/// the way one eyeballs a discriminant before cutting on it. When
/// `save_plots` is set, the histogram, the per-tagger ROC curves, and the
/// JSON report land in the output directory; otherwise nothing touches disk.
pub struct TaggerComparison {
    table: Table,
    truth_column: String,
    score_column: String,
    taggers: Vec<Box<dyn Tagger>>,
    hist_lo: f64,
    hist_hi: f64,
    hist_bins: usize,
    save_plots: bool,
    output_dir: PathBuf,
    export_format: ExportFormat,
}

impl std::fmt::Debug for TaggerComparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggerComparison")
            .field("table", &self.table)
            .field("truth_column", &self.truth_column)
            .field("score_column", &self.score_column)
            .field(
                "taggers",
                &self.taggers.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("hist_lo", &self.hist_lo)
            .field("hist_hi", &self.hist_hi)
            .field("hist_bins", &self.hist_bins)
            .field("save_plots", &self.save_plots)
            .field("output_dir", &self.output_dir)
            .field("export_format", &self.export_format)
            .finish()
    }
}

impl TaggerComparison {
    pub fn new(
        table: Table,
        truth_column: &str,
        score_column: &str,
        taggers: Vec<Box<dyn Tagger>>,
        save_plots: bool,
        output_dir: PathBuf,
    ) -> Result<Self, Error> {
        if taggers.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "at least one tagger is required",
            ));
        }
        Ok(Self {
            table,
            truth_column: truth_column.to_string(),
            score_column: score_column.to_string(),
            taggers,
            hist_lo: 0.0,
            hist_hi: 1.0,
            hist_bins: 50,
            save_plots,
            output_dir,
            export_format: ExportFormat::Csv,
        })
    }

    /// Overrides the default `[0, 1)` / 50-bin histogram binning.
    pub fn with_binning(mut self, lo: f64, hi: f64, bins: usize) -> Result<Self, Error> {
        // reuse the histogram ctor guards so a bad binning fails here, not
        // mid-run
        ClassSplitHistogram::new(lo, hi, bins)?;
        self.hist_lo = lo;
        self.hist_hi = hi;
        self.hist_bins = bins;
        Ok(self)
    }

    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }

    pub fn run(&self) -> Result<ComparisonReport, TaskError> {
        let truth = self.table.labels(&self.truth_column)?;

        let mut entries = Vec::with_capacity(self.taggers.len());
        for tagger in &self.taggers {
            let predicted = tagger.tag(&self.table)?;
            let matrix = ConfusionMatrix::from_labels(&predicted, &truth)?;
            let roc = RocCurve::from_scores(&tagger.scores(&self.table)?, &truth)?;
            if self.save_plots {
                fs::create_dir_all(&self.output_dir)?;
                roc.export(
                    self.output_dir.join(format!(
                        "roc_{}.{}",
                        file_stem(tagger.name()),
                        self.export_format
                    )),
                    self.export_format,
                )?;
            }
            entries.push(TaggerEntry {
                name: tagger.name().to_string(),
                matrix,
                accuracy: matrix.accuracy(),
                fraction_wrong: matrix.fraction_wrong(),
                true_positive_rate: matrix.true_positive_rate(),
                false_positive_rate: matrix.false_positive_rate(),
                auc: roc.auc(),
            });
        }

        let mut histogram =
            ClassSplitHistogram::new(self.hist_lo, self.hist_hi, self.hist_bins)?;
        histogram.fill_labeled(&self.table.column(&self.score_column)?, &truth)?;

        let significance = match entries.as_slice() {
            [a, b] => {
                let n = truth.len() as u64;
                let z = two_proportion_z(a.matrix.correct(), n, b.matrix.correct(), n);
                Some(Significance {
                    z,
                    p_value: two_sided_p_value(z),
                })
            }
            _ => None,
        };

        let report = ComparisonReport {
            generated_at: Utc::now().to_rfc3339(),
            samples: truth.len() as u64,
            score_column: self.score_column.clone(),
            entries,
            significance,
        };

        if self.save_plots {
            fs::create_dir_all(&self.output_dir)?;
            histogram.export(
                self.output_dir.join(format!(
                    "{}_by_class.{}",
                    file_stem(&self.score_column),
                    self.export_format
                )),
                self.export_format,
            )?;
            let file = File::create(self.output_dir.join("report.json"))?;
            serde_json::to_writer_pretty(file, &report)?;
        }

        Ok(report)
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Per-tagger slice of the report.
#[derive(Debug, Clone, Serialize)]
pub struct TaggerEntry {
    pub name: String,
    pub matrix: ConfusionMatrix,
    pub accuracy: f64,
    pub fraction_wrong: f64,
    pub true_positive_rate: f64,
    pub false_positive_rate: f64,
    pub auc: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Significance {
    pub z: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub generated_at: String,
    pub samples: u64,
    pub score_column: String,
    pub entries: Vec<TaggerEntry>,
    pub significance: Option<Significance>,
}

impl Display for ComparisonReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "tagger comparison over {} jets ({})",
            self.samples, self.generated_at
        )?;
        for e in &self.entries {
            writeln!(f, "== {} ==", e.name)?;
            writeln!(f, "{}", e.matrix)?;
            writeln!(
                f,
                "  tpr={:.6}, fpr={:.6}, auc={:.6}",
                e.true_positive_rate, e.false_positive_rate, e.auc
            )?;
        }
        if let Some(s) = &self.significance {
            writeln!(
                f,
                "accuracy difference: z={:.3}, two-sided p={:.4}",
                s.z, s.p_value
            )?;
        }
        Ok(())
    }
}
