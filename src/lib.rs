pub mod activation;
pub mod build;
pub mod codec;
pub mod config;
pub mod manager;
pub mod session;

pub(crate) mod logging;

#[cfg(test)]
mod test_utils;

uniffi::setup_scaffolding!();
