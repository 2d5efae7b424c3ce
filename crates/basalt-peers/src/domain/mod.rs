pub mod peer_id;
pub mod peer_info;
pub mod registry;
pub mod reputation;
pub mod state;
