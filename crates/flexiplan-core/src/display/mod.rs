pub mod progress;
pub mod table;

pub use progress::{ProgressSpinner, display_operation_result};
pub use table::TableDisplay;
