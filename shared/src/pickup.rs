//! Pickup time slots
//!
//! Fixed half-hour grid the customer picks from at checkout. The
//! slot is stored on the order as the literal string.

/// All offered pickup slots, opening to closing
pub const PICKUP_TIMES: &[&str] = &[
    "08:00 AM", "08:30 AM", "09:00 AM", "09:30 AM",
    "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "12:00 PM", "12:30 PM", "01:00 PM", "01:30 PM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
    "04:00 PM", "04:30 PM", "05:00 PM", "05:30 PM",
    "06:00 PM",
];

/// Whether `slot` is one of the offered pickup times
pub fn is_valid_pickup_time(slot: &str) -> bool {
    PICKUP_TIMES.contains(&slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_slots() {
        assert!(is_valid_pickup_time("08:00 AM"));
        assert!(is_valid_pickup_time("06:00 PM"));
        assert!(!is_valid_pickup_time("07:00 AM"));
        assert!(!is_valid_pickup_time(""));
    }
}
