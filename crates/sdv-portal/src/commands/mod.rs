pub mod access;
pub mod auth;
pub mod dispatch;
pub mod documents;
pub mod navigate;
pub mod portal;
pub mod studies;
