pub mod config;
pub mod engine;
pub mod frame;
pub mod games;
pub mod logger;

pub use engine::session::{
    GameBroadcaster, GameOverNotification, SessionCommand, SessionCommandSender, SessionHandle,
    SessionSummary, SnakeSession,
};
pub use games::SessionRng;
