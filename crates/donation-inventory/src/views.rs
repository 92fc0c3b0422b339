//! Read-only views computed from the donation list.
//!
//! Everything here is a pure function of its inputs. An empty list yields
//! zero counts and totals, never an error.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::donation::{DonationRecord, DonationType, UnknownDonationType};

/// Which donations a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Every donation.
    #[default]
    All,
    /// Only donations of one type.
    Only(DonationType),
}

impl TypeFilter {
    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(self, record: &DonationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => record.donation_type == t,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = UnknownDonationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl From<DonationType> for TypeFilter {
    fn from(t: DonationType) -> Self {
        Self::Only(t)
    }
}

/// Count and total value of one donation type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// The type summarised.
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    /// Number of donations of that type.
    pub count: usize,
    /// Sum of their values.
    pub total: f64,
}

/// Aggregates over the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    /// Number of donations of any type.
    pub total_count: usize,
    /// Sum of the values of money donations.
    pub total_money: f64,
}

/// Donations passing `filter`, in their original order.
#[must_use]
pub fn filter_by_type(records: &[DonationRecord], filter: TypeFilter) -> Vec<&DonationRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Count and total of the donations of `donation_type`.
#[must_use]
pub fn summarize(records: &[DonationRecord], donation_type: DonationType) -> Summary {
    let (count, total) = records
        .iter()
        .filter(|r| r.donation_type == donation_type)
        .fold((0, 0.0), |(count, total), r| (count + 1, total + r.value));
    Summary {
        donation_type,
        count,
        total,
    }
}

/// Total number of donations and total money donated.
#[must_use]
pub fn statistics(records: &[DonationRecord]) -> Statistics {
    Statistics {
        total_count: records.len(),
        total_money: summarize(records, DonationType::Money).total,
    }
}
