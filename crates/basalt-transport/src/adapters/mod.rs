pub mod tcp;

pub use tcp::{handshake, read_frame, write_frame, SecureChannel};
