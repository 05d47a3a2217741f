pub mod banner;
pub mod consts;
pub mod engine;
pub mod protocol;
pub mod relay;
pub mod server;
