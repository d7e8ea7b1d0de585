pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod favicon;
pub mod http;
pub mod server;
pub mod store;
