pub mod chat;
pub mod menu;
