//! External service clients

pub mod jellyfin;
