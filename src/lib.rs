//! Bobacom library exports for testing

pub mod core;
pub mod reader;
pub mod transport;
pub mod tui;

#[cfg(test)]
pub mod test_support;
