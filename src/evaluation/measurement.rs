use serde::Serialize;

/// Named scalar metric produced by an evaluation.
///
/// Typical examples: `"accuracy"`, `"fraction_wrong"`, `"auc"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Measurement {
        Measurement {
            name: name.into(),
            value,
        }
    }
}
