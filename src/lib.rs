/// Pack Wizard - NFT pack creation wizard
///
/// Core library providing the wizard state machine, selection rules and
/// submission orchestration for creating redeemable NFT packs.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
