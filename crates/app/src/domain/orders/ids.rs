//! Order id generation.

use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::domain::orders::models::OrderId;

/// Prefix shared by every generated order id.
pub const ORDER_ID_PREFIX: &str = "TRX";

/// Source of fresh order ids.
#[automock]
pub trait OrderIds: Send + Sync {
    fn next_id(&self) -> OrderId;
}

/// `TRX-YYYYMMDD-xxxxxxxx`: the UTC date plus 32 random bits in hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderIds;

impl OrderIds for RandomOrderIds {
    fn next_id(&self) -> OrderId {
        format_order_id(Timestamp::now(), Uuid::new_v4())
    }
}

fn format_order_id(at: Timestamp, random: Uuid) -> OrderId {
    let suffix = random.as_u128() >> 96;

    OrderId::new(format!(
        "{ORDER_ID_PREFIX}-{}-{suffix:08x}",
        at.strftime("%Y%m%d")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uses_utc_date_and_leading_random_bits() -> Result<(), jiff::Error> {
        let at: Timestamp = "2026-03-15T23:30:00-05:00".parse()?;
        let random = Uuid::from_u128(0x9f3a_1c07_0000_0000_0000_0000_0000_0001);

        assert_eq!(
            format_order_id(at, random).as_str(),
            "TRX-20260316-9f3a1c07"
        );

        Ok(())
    }

    #[test]
    fn suffix_is_zero_padded() -> Result<(), jiff::Error> {
        let at: Timestamp = "2026-01-02T00:00:00Z".parse()?;

        assert_eq!(
            format_order_id(at, Uuid::nil()).as_str(),
            "TRX-20260102-00000000"
        );

        Ok(())
    }

    #[test]
    fn random_ids_match_format() {
        let id = RandomOrderIds.next_id();
        let parts: Vec<&str> = id.as_str().split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], ORDER_ID_PREFIX);
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
