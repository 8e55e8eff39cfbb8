use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("predicted and actual label sequences differ in length ({predicted} vs {actual})")]
    ShapeMismatch { predicted: usize, actual: usize },

    #[error("cannot evaluate empty label sequences")]
    EmptyInput,

    #[error("truth contains only class {label}; both classes are required")]
    SingleClassTruth { label: u8 },
}
