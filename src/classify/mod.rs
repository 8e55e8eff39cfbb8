mod tagger;
mod threshold;

pub use tagger::{ScoreCutTagger, Tagger};
pub use threshold::ThresholdClassifier;
