pub mod logging;
pub mod pack;
