/// Core logic for ratioline: validation, derived values, form state.
///
/// This crate contains the shared types, the store and configuration logic
/// used across the ratioline workspace. No terminal, no I/O beyond config.

pub mod config;
pub mod error;
pub mod field;
pub mod format;
pub mod store;
pub mod traits;
pub mod validate;

pub use config::AppConfig;
pub use error::{CoreError, ValidationError};
pub use field::NumericField;
pub use format::{DisplayValue, compute_display_value, format_tick};
pub use store::{Commit, FieldEdit, LineId, ValueStore};
pub use traits::ValueSink;
pub use validate::validate;
