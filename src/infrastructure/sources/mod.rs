//! Source connector implementations

mod connection;

pub use connection::ConnectionSourceConnector;
