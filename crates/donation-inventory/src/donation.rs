//! Core donation types.
//!
//! This module defines the donation record persisted in the store and the
//! closed set of donation categories it can belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The category a donation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationType {
    /// Cash donations; the value is an amount in dollars.
    Money,
    /// Food items; the value is a count.
    Food,
    /// Clothing items; the value is a count.
    Clothing,
    /// Toys; the value is a count.
    Toys,
    /// Anything else; the value is a count.
    Other,
}

impl DonationType {
    /// Every donation type, in display order.
    pub const ALL: [Self; 5] = [
        Self::Money,
        Self::Food,
        Self::Clothing,
        Self::Toys,
        Self::Other,
    ];

    /// The lowercase name used in storage and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Food => "food",
            Self::Clothing => "clothing",
            Self::Toys => "toys",
            Self::Other => "other",
        }
    }

    /// Capitalised name for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Money => "Money",
            Self::Food => "Food",
            Self::Clothing => "Clothing",
            Self::Toys => "Toys",
            Self::Other => "Other",
        }
    }

    /// Whether values of this type are dollar amounts rather than counts.
    #[must_use]
    pub fn is_monetary(self) -> bool {
        matches!(self, Self::Money)
    }

    /// Heading for a total of this type's values.
    #[must_use]
    pub fn value_label(self) -> &'static str {
        if self.is_monetary() {
            "Amount ($)"
        } else {
            "Quantity"
        }
    }

    /// Render a value of this type, prefixing money with `$`.
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        if self.is_monetary() {
            format!("${value}")
        } else {
            value.to_string()
        }
    }
}

impl fmt::Display for DonationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a donation type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown donation type: '{0}'")]
pub struct UnknownDonationType(pub String);

impl FromStr for DonationType {
    type Err = UnknownDonationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownDonationType(s.to_string()))
    }
}

/// The fields of a donation, without its identifier.
///
/// This is what the form produces and what the store accepts for both
/// creation and replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    /// Who gave the donation.
    pub donor: String,
    /// What kind of donation it is.
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    /// Dollars for money, a count otherwise.
    pub value: f64,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
}

/// A stored donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Unique identifier assigned by the store.
    pub id: String,
    /// Who gave the donation.
    pub donor: String,
    /// What kind of donation it is.
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    /// Dollars for money, a count otherwise.
    pub value: f64,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
}

impl DonationRecord {
    /// Build a record from its id and fields.
    #[must_use]
    pub fn new(id: impl Into<String>, donation: NewDonation) -> Self {
        Self {
            id: id.into(),
            donor: donation.donor,
            donation_type: donation.donation_type,
            value: donation.value,
            date: donation.date,
        }
    }

    /// Replace every field except the id.
    pub fn apply(&mut self, donation: NewDonation) {
        self.donor = donation.donor;
        self.donation_type = donation.donation_type;
        self.value = donation.value;
        self.date = donation.date;
    }

    /// The value rendered for this record's type.
    #[must_use]
    pub fn display_value(&self) -> String {
        self.donation_type.format_value(self.value)
    }

    /// Check the record against the stored-record invariants.
    ///
    /// Returns a description of the first violation found.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("empty id".to_string());
        }
        if self.donor.trim().is_empty() {
            return Err(format!("record {} has an empty donor", self.id));
        }
        if self.date.trim().is_empty() {
            return Err(format!("record {} has an empty date", self.id));
        }
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(format!(
                "record {} has a non-positive value {}",
                self.id, self.value
            ));
        }
        Ok(())
    }
}
