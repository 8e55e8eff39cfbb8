mod confusion;
mod error;
mod measurement;
mod roc;

pub use confusion::ConfusionMatrix;
pub use error::EvalError;
pub use measurement::Measurement;
pub use roc::{RocCurve, RocPoint};
