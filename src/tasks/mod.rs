mod tagger_comparison;

pub use tagger_comparison::{
    ComparisonReport, Significance, TaggerComparison, TaggerEntry, TaskError,
};
