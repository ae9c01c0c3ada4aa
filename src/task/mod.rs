//! Tasks that make up the application as well as the resources they use.
pub mod alarm;
pub mod display;
pub mod resources;
pub mod watchdog;
