use crate::classify::ThresholdClassifier;
use crate::dataset::{DatasetError, Table};

/// A binary tagger over a table of per-jet variables.
///
/// Taggers expose both the continuous discriminant they cut on (for ROC
/// sweeps) and the resulting per-row decision.
pub trait Tagger {
    /// Display name used in reports and exported file names.
    fn name(&self) -> &str;

    /// The continuous score, one value per table row.
    fn scores(&self, table: &Table) -> Result<Vec<f64>, DatasetError>;

    /// The binary decision, one label per table row.
    fn tag(&self, table: &Table) -> Result<Vec<u8>, DatasetError>;
}

/// Threshold cut on one named score column.
///
/// Both sides of the usual comparison are instances of this: the
/// hand-crafted selection cut on a physics variable, and the legacy network
/// score thresholded at its working point.
pub struct ScoreCutTagger {
    name: String,
    column: String,
    classifier: ThresholdClassifier,
}

impl ScoreCutTagger {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, column: C, cut: f64) -> ScoreCutTagger {
        ScoreCutTagger {
            name: name.into(),
            column: column.into(),
            classifier: ThresholdClassifier::new(cut),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn cut(&self) -> f64 {
        self.classifier.threshold
    }
}

impl Tagger for ScoreCutTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn scores(&self, table: &Table) -> Result<Vec<f64>, DatasetError> {
        table.column(&self.column)
    }

    fn tag(&self, table: &Table) -> Result<Vec<u8>, DatasetError> {
        Ok(self.classifier.classify_all(&self.scores(table)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::jet_table;

    #[test]
    fn tags_the_named_column() {
        let table = jet_table();
        let tagger = ScoreCutTagger::new("selection", "prob_b", 0.5);
        let labels = tagger.tag(&table).unwrap();
        assert_eq!(labels, table.labels("isb").unwrap());
    }

    #[test]
    fn missing_column_surfaces_as_dataset_error() {
        let table = jet_table();
        let tagger = ScoreCutTagger::new("selection", "spheri", 0.5);
        let err = tagger.tag(&table).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { name } if name == "spheri"));
    }

    #[test]
    fn exposes_its_configuration() {
        let tagger = ScoreCutTagger::new("benchmark", "nnbjet", 0.35);
        assert_eq!(tagger.name(), "benchmark");
        assert_eq!(tagger.column(), "nnbjet");
        assert_eq!(tagger.cut(), 0.35);
    }
}
