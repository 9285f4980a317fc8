/// External (serializable) representations of instances and solutions.
pub mod ext_repr;

/// All logic for converting external representations into internal ones
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

pub use export::{export_results, export_solution};
pub use import::import;
