mod dummies;
mod stubs;

pub use dummies::jet_table;
pub use stubs::ScriptedDriver;
