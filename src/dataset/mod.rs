mod error;
mod schema;
mod table;

pub use error::DatasetError;
pub use schema::TableSchema;
pub use table::Table;
