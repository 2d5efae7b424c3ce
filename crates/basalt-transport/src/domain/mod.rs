pub mod envelope;
pub mod frame;
pub mod handshake;
pub mod key_schedule;
pub mod nonce;

pub use envelope::{decrypt, encrypt};
pub use frame::{check_frame_len, encode_frame, MAX_FRAME_LEN};
pub use handshake::{BestHead, ChainContext, Hello, HelloAck, RejectReason, verify_hello};
pub use key_schedule::{derive_directional_keys, DirectionalKeys};
pub use nonce::{NonceCounter, NonceTracker};
