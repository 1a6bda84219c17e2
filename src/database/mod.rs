pub mod connection;
pub mod matches;
pub mod models;
pub mod pairings;
pub mod ratings;
pub mod referees;
pub mod scores;
pub mod setup;
pub mod teams;
pub mod tournaments;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
