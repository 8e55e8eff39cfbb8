mod histogram;

pub use histogram::{ClassSplitHistogram, Histogram};

use strum_macros::{Display, EnumIter};

/// On-disk format for exported tables. The display form doubles as the file
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// Field delimiter for the flat-text formats; `None` means JSON.
    pub fn delimiter(self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}
