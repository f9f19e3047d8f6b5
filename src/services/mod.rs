/// MPRIS player tracking service
pub mod mpris;

pub use mpris::{ManagedPlayer, MediaError, MprisPlayer, NameEvent, PlayerManager, PlayerSort};
