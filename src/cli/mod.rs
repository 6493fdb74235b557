pub mod invoke;
pub mod server;
