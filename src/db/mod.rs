pub mod connection;
pub mod migration;
pub mod settings;

pub use connection::establish_connection;
