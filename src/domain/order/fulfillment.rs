use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::request::ShippingMethod;

// ============================================================================
// Fulfillment Rules - Delivery Estimation and Tracking Numbers
// ============================================================================

const EXPRESS_DAYS: u32 = 2;
const PRIORITY_DAYS: u32 = 3;
const STANDARD_DOMESTIC_DAYS: u32 = 5;
const STANDARD_INTERNATIONAL_DAYS: u32 = 10;

/// Business days to delivery for a shipping method and destination
pub fn delivery_business_days(method: ShippingMethod, domestic: bool) -> u32 {
    match method {
        ShippingMethod::Express => EXPRESS_DAYS,
        ShippingMethod::Priority => PRIORITY_DAYS,
        ShippingMethod::Standard => {
            if domestic {
                STANDARD_DOMESTIC_DAYS
            } else {
                STANDARD_INTERNATIONAL_DAYS
            }
        }
    }
}

/// Walk forward one calendar day per required business day, skipping
/// weekends day by day as they are landed on (not subtracted in bulk)
pub fn estimated_delivery(today: NaiveDate, method: ShippingMethod, domestic: bool) -> NaiveDate {
    let mut date = today;
    for _ in 0..delivery_business_days(method, domestic) {
        date = date + Days::new(1);
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date = date + Days::new(1);
        }
    }
    date
}

/// Tracking number scheme: TRK-{epoch seconds}-{5 digit suffix}
pub fn tracking_number(epoch_seconds: i64, suffix: u32) -> String {
    format!("TRK-{}-{}", epoch_seconds, suffix)
}

// ============================================================================
// Unit Tests
// ============================================================================
