pub mod engine;
pub mod handlers;
pub mod publish;
pub mod types;

pub use engine::{MediaEngine, RoomConnection};
pub use publish::PublishOutcome;
pub use types::{RoomEvent, RoomOptions, TrackInfo, TrackKind, TrackSource};
