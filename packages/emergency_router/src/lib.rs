//! Plans routes for emergency vehicles across a road network stored in
//! PostgreSQL. For each request two routes are planned with A*: one using
//! the physical length of each road, and one after long road segments have
//! been penalised to simulate congestion.

pub mod common;
pub mod loading;
pub mod routing;
pub mod server;
