use crate::evaluation::{EvalError, Measurement};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// 2×2 confusion counts for a binary tagger, indexed by (predicted, actual).
///
/// `from_labels` is the batch entry point and validates its inputs up front;
/// `add` updates one pair at a time for callers that stream decisions in.
/// The derived scalars satisfy `accuracy() + fraction_wrong() == 1` and the
/// four counts always sum to the number of pairs counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_negative: u64,
    pub false_negative: u64,
    pub false_positive: u64,
    pub true_positive: u64,
}

impl ConfusionMatrix {
    pub fn new() -> ConfusionMatrix {
        ConfusionMatrix::default()
    }

    /// Counts every (predicted, actual) pair of two equal-length label
    /// sequences.
    ///
    /// Fails fast with [`EvalError::ShapeMismatch`] on differing lengths and
    /// [`EvalError::EmptyInput`] on empty input, so the derived fractions are
    /// always well defined on success.
    pub fn from_labels(predicted: &[u8], actual: &[u8]) -> Result<ConfusionMatrix, EvalError> {
        if predicted.len() != actual.len() {
            return Err(EvalError::ShapeMismatch {
                predicted: predicted.len(),
                actual: actual.len(),
            });
        }
        if predicted.is_empty() {
            return Err(EvalError::EmptyInput);
        }
        let mut matrix = ConfusionMatrix::new();
        for (&p, &a) in predicted.iter().zip(actual) {
            matrix.add(p, a);
        }
        Ok(matrix)
    }

    /// Counts one (predicted, actual) pair. Nonzero labels bucket as 1.
    #[inline]
    pub fn add(&mut self, predicted: u8, actual: u8) {
        match (predicted != 0, actual != 0) {
            (false, false) => self.true_negative += 1,
            (false, true) => self.false_negative += 1,
            (true, false) => self.false_positive += 1,
            (true, true) => self.true_positive += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_negative + self.false_negative + self.false_positive + self.true_positive
    }

    pub fn correct(&self) -> u64 {
        self.true_negative + self.true_positive
    }

    /// `(FN + FP) / N`. NaN when nothing has been counted yet.
    pub fn fraction_wrong(&self) -> f64 {
        (self.false_negative + self.false_positive) as f64 / self.total() as f64
    }

    /// `(TN + TP) / N`. NaN when nothing has been counted yet.
    pub fn accuracy(&self) -> f64 {
        self.correct() as f64 / self.total() as f64
    }

    /// Signal efficiency `TP / (TP + FN)`. NaN when no actual signal was seen.
    pub fn true_positive_rate(&self) -> f64 {
        self.true_positive as f64 / (self.true_positive + self.false_negative) as f64
    }

    /// Background mistag rate `FP / (FP + TN)`. NaN when no actual
    /// background was seen.
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive as f64 / (self.false_positive + self.true_negative) as f64
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.accuracy()),
            Measurement::new("fraction_wrong", self.fraction_wrong()),
            Measurement::new("true_positive_rate", self.true_positive_rate()),
            Measurement::new("false_positive_rate", self.false_positive_rate()),
        ]
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "               actual=0   actual=1")?;
        writeln!(
            f,
            "  pred=0     {:>10} {:>10}",
            self.true_negative, self.false_negative
        )?;
        writeln!(
            f,
            "  pred=1     {:>10} {:>10}",
            self.false_positive, self.true_positive
        )?;
        write!(
            f,
            "  accuracy={:.6}, fraction_wrong={:.6}",
            self.accuracy(),
            self.fraction_wrong()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_the_four_quadrants() {
        let m = ConfusionMatrix::from_labels(&[0, 0, 1, 1], &[0, 1, 0, 1]).unwrap();
        assert_eq!(m.true_negative, 1);
        assert_eq!(m.false_negative, 1);
        assert_eq!(m.false_positive, 1);
        assert_eq!(m.true_positive, 1);
        assert!((m.fraction_wrong() - 0.5).abs() < 1e-12);
        assert!((m.accuracy() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn counts_sum_to_input_length() {
        let predicted = [0, 1, 1, 0, 1, 0, 0];
        let actual = [1, 1, 0, 0, 1, 1, 0];
        let m = ConfusionMatrix::from_labels(&predicted, &actual).unwrap();
        assert_eq!(m.total(), predicted.len() as u64);
        assert!((m.accuracy() + m.fraction_wrong() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_agreement() {
        let labels = [1, 0, 1, 1, 0];
        let m = ConfusionMatrix::from_labels(&labels, &labels).unwrap();
        assert_eq!(m.fraction_wrong(), 0.0);
        assert_eq!(m.accuracy(), 1.0);
    }

    #[test]
    fn total_disagreement() {
        let m = ConfusionMatrix::from_labels(&[1, 0, 1], &[0, 1, 0]).unwrap();
        assert_eq!(m.accuracy(), 0.0);
        assert_eq!(m.fraction_wrong(), 1.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(
            ConfusionMatrix::from_labels(&[], &[]),
            Err(EvalError::EmptyInput)
        );
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        assert_eq!(
            ConfusionMatrix::from_labels(&[0, 1], &[0]),
            Err(EvalError::ShapeMismatch {
                predicted: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn nonzero_labels_bucket_as_one() {
        let m = ConfusionMatrix::from_labels(&[2, 0], &[1, 3]).unwrap();
        assert_eq!(m.true_positive, 1);
        assert_eq!(m.false_negative, 1);
    }

    #[test]
    fn rates_for_an_unbalanced_matrix() {
        // 3 signal (2 found), 5 background (1 mistagged)
        let predicted = [1, 1, 0, 1, 0, 0, 0, 0];
        let actual = [1, 1, 1, 0, 0, 0, 0, 0];
        let m = ConfusionMatrix::from_labels(&predicted, &actual).unwrap();
        assert!((m.true_positive_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.false_positive_rate() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn rates_are_nan_without_the_class() {
        let m = ConfusionMatrix::from_labels(&[1, 0], &[1, 1]).unwrap();
        assert!(m.false_positive_rate().is_nan());
        assert!((m.true_positive_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fresh_matrix_reports_nan_fractions() {
        let m = ConfusionMatrix::new();
        assert_eq!(m.total(), 0);
        assert!(m.accuracy().is_nan());
        assert!(m.fraction_wrong().is_nan());
    }

    #[test]
    fn measurements_expose_the_derived_scalars() {
        let m = ConfusionMatrix::from_labels(&[1, 1, 0, 0], &[1, 0, 0, 0]).unwrap();
        let ms = m.measurements();
        let get = |name: &str| ms.iter().find(|x| x.name == name).unwrap().value;
        assert!((get("accuracy") - 0.75).abs() < 1e-12);
        assert!((get("fraction_wrong") - 0.25).abs() < 1e-12);
        assert!((get("true_positive_rate") - 1.0).abs() < 1e-12);
        assert!((get("false_positive_rate") - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn incremental_add_matches_batch() {
        let predicted = [0, 1, 1, 0];
        let actual = [0, 1, 0, 1];
        let batch = ConfusionMatrix::from_labels(&predicted, &actual).unwrap();
        let mut incremental = ConfusionMatrix::new();
        for (&p, &a) in predicted.iter().zip(&actual) {
            incremental.add(p, a);
        }
        assert_eq!(batch, incremental);
    }

    #[test]
    fn display_renders_the_table() {
        let m = ConfusionMatrix::from_labels(&[0, 0, 1, 1], &[0, 1, 0, 1]).unwrap();
        let text = m.to_string();
        let exp = "\
               actual=0   actual=1
  pred=0              1          1
  pred=1              1          1
  accuracy=0.500000, fraction_wrong=0.500000";
        assert_eq!(text, exp);
    }
}
