use super::types::{RoomEvent, RoomOptions};
use crate::error::EngineError;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

/// Factory of room handles; the real-time media SDK sits behind it.
pub trait MediaEngine: Send + Sync {
    fn create_room(&self, options: RoomOptions) -> Box<dyn RoomConnection>;
}

/// One room session inside the media engine.
///
/// Setup is ordered: [`subscribe`](RoomConnection::subscribe) must be called
/// before [`connect`](RoomConnection::connect) so no event emitted while
/// connecting is lost. Engines may refuse to connect a handle nobody listens
/// to with [`EngineError::NoSubscriber`].
#[async_trait]
pub trait RoomConnection: Send {
    /// Registers the single event listener of this handle.
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RoomEvent>;

    async fn connect(&mut self, url: &str, token: &str) -> Result<(), EngineError>;

    fn local_identity(&self) -> String;

    /// Remote identities currently in the room, in join order.
    fn remote_participants(&self) -> Vec<String>;

    async fn set_camera_enabled(&mut self, enabled: bool) -> Result<(), EngineError>;
    async fn set_microphone_enabled(&mut self, enabled: bool) -> Result<(), EngineError>;
    async fn set_screen_share_enabled(&mut self, enabled: bool) -> Result<(), EngineError>;

    fn is_camera_enabled(&self) -> bool;
    fn is_microphone_enabled(&self) -> bool;
    fn is_screen_share_enabled(&self) -> bool;

    /// Sends `payload` to every participant over the reliable data channel.
    async fn publish_data(&mut self, payload: Bytes) -> Result<(), EngineError>;

    /// Leaves the room. Safe to call on a handle that never connected.
    async fn disconnect(&mut self);
}
