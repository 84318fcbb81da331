pub mod annotations;
pub mod config;
pub mod display;
pub mod error;

#[cfg(test)]
pub mod test_utils;
