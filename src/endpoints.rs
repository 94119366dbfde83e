//! Endpoint-pair selection over a device's active configuration.
//!
//! Kept free of rusb types so the selection rule is testable without
//! hardware; [`crate::device`] feeds it descriptor data.

/// Top bit of an endpoint address encodes direction: set means IN
/// (device-to-host), clear means OUT (host-to-device).
pub const DIRECTION_MASK: u8 = 0x80;

/// The endpoint pair resolved for a run, fixed after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointPair {
    pub interface: u8,
    pub out_address: u8,
    pub in_address: u8,
}

/// Pick the first interface (in configuration order) that exposes both an
/// OUT and an IN endpoint, keeping the first endpoint of each direction.
///
/// `interfaces` yields `(interface_number, endpoint_addresses)` per
/// interface descriptor. Returns `None` if no interface qualifies.
pub fn select_endpoint_pair<I, A>(interfaces: I) -> Option<EndpointPair>
where
    I: IntoIterator<Item = (u8, A)>,
    A: IntoIterator<Item = u8>,
{
    for (interface, addresses) in interfaces {
        let mut out_address = None;
        let mut in_address = None;
        for address in addresses {
            if address & DIRECTION_MASK == 0 {
                out_address.get_or_insert(address);
            } else {
                in_address.get_or_insert(address);
            }
        }
        if let (Some(out_address), Some(in_address)) = (out_address, in_address) {
            return Some(EndpointPair {
                interface,
                out_address,
                in_address,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_interfaces_missing_a_direction() {
        // interface 0 only has an IN endpoint; 1 has the full pair
        let pair = select_endpoint_pair(vec![(0, vec![0x81]), (1, vec![0x02, 0x82])]).unwrap();
        assert_eq!(
            pair,
            EndpointPair {
                interface: 1,
                out_address: 0x02,
                in_address: 0x82
            }
        );
    }

    #[test]
    fn first_endpoint_of_each_direction_wins() {
        let pair = select_endpoint_pair(vec![(0, vec![0x02, 0x03, 0x82, 0x83])]).unwrap();
        assert_eq!(pair.out_address, 0x02);
        assert_eq!(pair.in_address, 0x82);
    }

    #[test]
    fn endpoint_order_within_an_interface_does_not_matter() {
        let pair = select_endpoint_pair(vec![(2, vec![0x81, 0x01])]).unwrap();
        assert_eq!(pair.interface, 2);
        assert_eq!(pair.out_address, 0x01);
        assert_eq!(pair.in_address, 0x81);
    }

    #[test]
    fn no_qualifying_interface_yields_none() {
        assert_eq!(
            select_endpoint_pair(vec![(0, vec![0x81]), (1, vec![0x01]), (2, vec![])]),
            None
        );
        assert_eq!(select_endpoint_pair(Vec::<(u8, Vec<u8>)>::new()), None);
    }
}
