use crate::evaluation::EvalError;
use crate::plot::ExportFormat;
use serde::Serialize;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

/// One working point of a score sweep: the rates obtained by accepting every
/// jet scoring at least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub false_positive_rate: f64,
    pub true_positive_rate: f64,
}

/// Receiver operating characteristic of a continuous score against binary
/// truth.
///
/// Every distinct score value is swept as a candidate cut, producing
/// monotone (FPR, TPR) points from (0, 0) at an infinite threshold to
/// (1, 1) at the lowest one. Ties share a single point.
#[derive(Debug)]
pub struct RocCurve {
    points: Vec<RocPoint>,
}

impl RocCurve {
    pub fn from_scores(scores: &[f64], truth: &[u8]) -> Result<RocCurve, EvalError> {
        if scores.len() != truth.len() {
            return Err(EvalError::ShapeMismatch {
                predicted: scores.len(),
                actual: truth.len(),
            });
        }
        if scores.is_empty() {
            return Err(EvalError::EmptyInput);
        }
        let positives = truth.iter().filter(|&&t| t != 0).count() as f64;
        let negatives = scores.len() as f64 - positives;
        if positives == 0.0 {
            return Err(EvalError::SingleClassTruth { label: 0 });
        }
        if negatives == 0.0 {
            return Err(EvalError::SingleClassTruth { label: 1 });
        }

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let mut points = vec![RocPoint {
            threshold: f64::INFINITY,
            false_positive_rate: 0.0,
            true_positive_rate: 0.0,
        }];
        let mut true_positives = 0u64;
        let mut false_positives = 0u64;
        let mut i = 0;
        while i < order.len() {
            let threshold = scores[order[i]];
            while i < order.len() && scores[order[i]].total_cmp(&threshold).is_eq() {
                if truth[order[i]] != 0 {
                    true_positives += 1;
                } else {
                    false_positives += 1;
                }
                i += 1;
            }
            points.push(RocPoint {
                threshold,
                false_positive_rate: false_positives as f64 / negatives,
                true_positive_rate: true_positives as f64 / positives,
            });
        }
        Ok(RocCurve { points })
    }

    pub fn points(&self) -> &[RocPoint] {
        &self.points
    }

    /// Area under the curve by trapezoid rule.
    pub fn auc(&self) -> f64 {
        let mut area = 0.0;
        for pair in self.points.windows(2) {
            let dx = pair[1].false_positive_rate - pair[0].false_positive_rate;
            area += dx * (pair[0].true_positive_rate + pair[1].true_positive_rate) / 2.0;
        }
        area
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, format: ExportFormat) -> Result<(), Error> {
        match format.delimiter() {
            Some(d) => self.export_with_delimiter(path, d),
            None => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(
            w,
            "threshold{d}false_positive_rate{d}true_positive_rate",
            d = delimiter
        )?;
        for p in &self.points {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}",
                p.threshold,
                p.false_positive_rate,
                p.true_positive_rate,
                d = delimiter
            )?;
        }
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "[")?;
        for (i, p) in self.points.iter().enumerate() {
            // the sweep's opening point has an infinite threshold, which JSON
            // cannot carry as a number
            let threshold = if p.threshold.is_finite() {
                p.threshold.to_string()
            } else {
                "null".to_string()
            };
            writeln!(
                w,
                "  {{\"threshold\":{},\"false_positive_rate\":{},\"true_positive_rate\":{}}}{}",
                threshold,
                p.false_positive_rate,
                p.true_positive_rate,
                if i + 1 == self.points.len() { "" } else { "," }
            )?;
        }
        writeln!(w, "]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn perfect_separation_has_unit_area() {
        let roc = RocCurve::from_scores(&[0.9, 0.8, 0.2, 0.1], &[1, 1, 0, 0]).unwrap();
        assert!((roc.auc() - 1.0).abs() < 1e-12);
        let last = roc.points().last().unwrap();
        assert_eq!(last.false_positive_rate, 1.0);
        assert_eq!(last.true_positive_rate, 1.0);
    }

    #[test]
    fn inverted_score_has_zero_area() {
        let roc = RocCurve::from_scores(&[0.9, 0.8, 0.2, 0.1], &[0, 0, 1, 1]).unwrap();
        assert!(roc.auc().abs() < 1e-12);
    }

    #[test]
    fn interleaved_scores_give_the_concordant_pair_fraction() {
        let roc = RocCurve::from_scores(&[0.9, 0.8, 0.7, 0.6], &[1, 0, 1, 0]).unwrap();
        // points: (0,0) (0,.5) (.5,.5) (.5,1) (1,1); 3 of 4 signal/background
        // pairs rank correctly
        assert!((roc.auc() - 0.75).abs() < 1e-12);
        assert_eq!(roc.points().len(), 5);
    }

    #[test]
    fn tied_scores_share_one_point() {
        let roc = RocCurve::from_scores(&[0.5, 0.5, 0.1], &[1, 0, 0]).unwrap();
        // (0,0) then both 0.5-scores at once, then the 0.1 background
        assert_eq!(roc.points().len(), 3);
        let mid = roc.points()[1];
        assert_eq!(mid.threshold, 0.5);
        assert!((mid.true_positive_rate - 1.0).abs() < 1e-12);
        assert!((mid.false_positive_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rates_never_decrease_along_the_sweep() {
        let scores = [0.1, 0.9, 0.4, 0.6, 0.3, 0.8, 0.2];
        let truth = [0, 1, 0, 1, 1, 0, 0];
        let roc = RocCurve::from_scores(&scores, &truth).unwrap();
        for pair in roc.points().windows(2) {
            assert!(pair[1].false_positive_rate >= pair[0].false_positive_rate);
            assert!(pair[1].true_positive_rate >= pair[0].true_positive_rate);
        }
    }

    #[test]
    fn input_validation() {
        assert_eq!(
            RocCurve::from_scores(&[0.1], &[]).unwrap_err(),
            EvalError::ShapeMismatch {
                predicted: 1,
                actual: 0
            }
        );
        assert_eq!(
            RocCurve::from_scores(&[], &[]).unwrap_err(),
            EvalError::EmptyInput
        );
        assert_eq!(
            RocCurve::from_scores(&[0.1, 0.2], &[0, 0]).unwrap_err(),
            EvalError::SingleClassTruth { label: 0 }
        );
        assert_eq!(
            RocCurve::from_scores(&[0.1, 0.2], &[1, 1]).unwrap_err(),
            EvalError::SingleClassTruth { label: 1 }
        );
    }

    #[test]
    fn export_csv_writes_one_row_per_point() {
        let roc = RocCurve::from_scores(&[0.9, 0.1], &[1, 0]).unwrap();
        let tf = NamedTempFile::new().unwrap();
        roc.export(tf.path(), ExportFormat::Csv).unwrap();
        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
threshold,false_positive_rate,true_positive_rate
inf,0.000000000000,0.000000000000
0.9,0.000000000000,1.000000000000
0.1,1.000000000000,1.000000000000
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_json_is_a_point_array() {
        let roc = RocCurve::from_scores(&[0.9, 0.1], &[1, 0]).unwrap();
        let tf = NamedTempFile::new().unwrap();
        roc.export(tf.path(), ExportFormat::Json).unwrap();
        let got = fs::read_to_string(tf.path()).unwrap();
        assert!(got.starts_with("[\n"));
        assert!(got.ends_with("]\n"));
        assert_eq!(got.matches("\"threshold\"").count(), 3);
    }
}
