//! IP-diversity prefixing (spec.md §4.6): peers sharing a `/24` IPv4 or
//! `/48` IPv6 prefix are treated as the same "neighborhood" for the
//! per-bucket diversity cap, so one operator can't fill a bucket by
//! spinning up many addresses on one subnet.

use std::net::IpAddr;

/// Opaque key identifying the subnet an address belongs to, for the
/// purposes of the diversity cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubnetKey {
    V4([u8; 3]),
    V6([u8; 6]),
}

pub fn subnet_key(addr: &IpAddr) -> SubnetKey {
    match addr {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            SubnetKey::V4([octets[0], octets[1], octets[2]])
        }
        IpAddr::V6(v6) => {
            let segments = v6.octets();
            let mut prefix = [0u8; 6];
            prefix.copy_from_slice(&segments[..6]);
            SubnetKey::V6(prefix)
        }
    }
}
