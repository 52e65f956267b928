//! Wire types for the browser farm's Automate API.
//!
//! This crate contains the serde-serializable types exchanged with the
//! farm's two remote surfaces: the CDP WebSocket endpoint that accepts a
//! capability object in its `caps` query parameter, and the REST API that
//! lists and updates automation sessions. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! Types in this crate are pure data: no I/O, no behavior beyond
//! serialization and endpoint formatting. The coordination logic that uses
//! them lives in the `farmhand` crate.

pub mod capabilities;
pub mod session;

pub use capabilities::*;
pub use session::*;
