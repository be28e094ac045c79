use serde::Serialize;
use crate::domain::models::booking::Package;
use crate::domain::models::hall::Hall;

pub const HALL_PRICES: [(&str, i64); 2] = [("small", 2000), ("big", 5000)];
pub const PACKAGE_PRICES: [(&str, i64); 3] = [("basic", 2500), ("premium", 5000), ("luxury", 8500)];

/// Deposit share of the total, in percent.
pub const DEPOSIT_PERCENT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub total: f64,
    pub deposit: f64,
}

fn lookup(table: &[(&str, i64)], key: &str) -> i64 {
    let key = key.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, price)| *price)
        .unwrap_or(0)
}

/// Round-half-up of `cents * percent / 100`, staying in integer cents.
fn percent_of_cents(cents: i64, percent: i64) -> i64 {
    (cents * percent + 50).div_euclid(100)
}

fn quote_from_whole_units(total: i64) -> Quote {
    let total_cents = total * 100;
    let deposit_cents = percent_of_cents(total_cents, DEPOSIT_PERCENT);
    Quote {
        total: total_cents as f64 / 100.0,
        deposit: deposit_cents as f64 / 100.0,
    }
}

/// String-keyed lookup. Unknown halls or packages contribute 0.
pub fn quote_for(hall: &str, package: &str) -> Quote {
    quote_from_whole_units(lookup(&HALL_PRICES, hall) + lookup(&PACKAGE_PRICES, package))
}

pub fn quote(hall: Hall, package: Package) -> Quote {
    quote_for(hall.as_str(), package.as_str())
}
