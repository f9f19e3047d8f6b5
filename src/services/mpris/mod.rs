/// Message bus seam and its D-Bus implementation
pub mod bus;
/// MPRIS bus name convention
pub mod bus_name;
/// Ordered collection of managed players
pub mod collection;
/// Media player error types
pub mod error;
/// Player manager event subscriptions
pub mod events;
/// Player manager: name tracking, managed players and event dispatch
pub mod manager;
/// Player handle capability and the D-Bus backed player
pub mod player;
/// D-Bus proxy trait definitions
pub mod proxy;
/// Player name registry
pub mod registry;
/// Name events and ownership change classification
pub mod types;

pub use bus::*;
pub use bus_name::{MPRIS_PREFIX, bus_name_for, player_id_from_bus_name};
pub use collection::*;
pub use error::*;
pub use events::{ManagerEvents, SubscriptionId};
pub use manager::*;
pub use player::*;
pub use proxy::*;
pub use registry::*;
pub use types::*;
