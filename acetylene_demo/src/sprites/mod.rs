//! Sprites of the demo scenes

pub mod coin;
pub mod ember;
pub mod player;

pub use coin::Coin;
pub use ember::{Ember, EmberField};
pub use player::Player;
