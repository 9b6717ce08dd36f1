pub mod chat;
pub mod record;
pub mod state;
