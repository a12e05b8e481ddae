pub mod asset_resolver;
pub mod config;
pub mod constants;
pub mod frame;
