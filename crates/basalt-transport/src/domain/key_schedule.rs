//! Directional key derivation (spec.md §4.8): one shared X25519 secret
//! expands via HKDF into two independent AEAD keys, one per direction, so
//! that a party can never decrypt its own outbound traffic.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

const INITIATOR_TO_RESPONDER_INFO: &[u8] = b"BASALT_TRANSPORT_I2R_V1";
const RESPONDER_TO_INITIATOR_INFO: &[u8] = b"BASALT_TRANSPORT_R2I_V1";

/// The two AES-256-GCM keys derived for one connection, one per direction.
pub struct DirectionalKeys {
    pub initiator_to_responder: [u8; 32],
    pub responder_to_initiator: [u8; 32],
}

impl Drop for DirectionalKeys {
    fn drop(&mut self) {
        self.initiator_to_responder.zeroize();
        self.responder_to_initiator.zeroize();
    }
}

/// Derive both directional keys from a raw X25519 shared secret. The
/// shared secret itself is not retained past this call.
pub fn derive_directional_keys(shared_secret: &[u8; 32]) -> DirectionalKeys {
    let hk = Hkdf::<Sha256>::new(None, shared_secret);
    let mut initiator_to_responder = [0u8; 32];
    let mut responder_to_initiator = [0u8; 32];
    hk.expand(INITIATOR_TO_RESPONDER_INFO, &mut initiator_to_responder)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    hk.expand(RESPONDER_TO_INITIATOR_INFO, &mut responder_to_initiator)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    DirectionalKeys {
        initiator_to_responder,
        responder_to_initiator,
    }
}
