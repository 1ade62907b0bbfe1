//! emunav library exports for testing

pub mod actions;
pub mod core;
pub mod emulator;

#[cfg(test)]
pub mod test_support;
