//! Command implementations.
//!
//! Each command returns the text to print so it can be exercised without a
//! terminal.

pub mod allocate;
pub mod calculate;
pub mod config;
pub mod derate;
pub mod hri;

pub use self::allocate::execute_allocate;
pub use self::calculate::execute_calculate;
pub use self::config::execute_config;
pub use self::derate::execute_derate;
pub use self::hri::execute_hri;
