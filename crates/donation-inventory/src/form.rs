//! The add/edit donation form.
//!
//! [`DonationForm`] holds raw text for each field and knows whether it is
//! composing a new donation or editing an existing one. Nothing is validated
//! until [`DonationForm::submit`], which is the only place donation input is
//! checked; the store trusts what the form hands it.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::donation::{DonationRecord, DonationType, NewDonation};
use crate::error::Result;
use crate::storage::SlotBackend;
use crate::store::DonationStore;

/// Why a form could not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The donor name is blank.
    #[error("missing or invalid field: donor is required")]
    MissingDonor,

    /// No donation type was chosen.
    #[error("missing or invalid field: type is required")]
    MissingType,

    /// The donation type is not one of the known types.
    #[error("missing or invalid field: unknown type '{0}'")]
    UnknownType(String),

    /// The date is blank.
    #[error("missing or invalid field: date is required")]
    MissingDate,

    /// The value is not a number.
    #[error("missing or invalid field: value '{0}' is not a number")]
    InvalidValue(String),

    /// The value is zero or negative.
    #[error("missing or invalid field: value '{0}' must be greater than 0")]
    NonPositiveValue(String),
}

/// A field of the form buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Donor name.
    Donor,
    /// Donation type.
    Type,
    /// Amount or quantity.
    Value,
    /// Calendar date.
    Date,
}

impl FormField {
    /// Field name as used in the form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Type => "type",
            Self::Value => "value",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "donor" => Ok(Self::Donor),
            "type" => Ok(Self::Type),
            "value" => Ok(Self::Value),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown form field: '{other}'")),
        }
    }
}

/// Whether the form creates a donation or edits one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Composing a new donation.
    #[default]
    Adding,
    /// Editing the donation with this id.
    Editing(String),
}

/// What a successful submit asks the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Create a donation.
    Add(NewDonation),
    /// Replace the fields of an existing donation.
    Update {
        /// Id of the donation to change.
        id: String,
        /// Its new fields.
        donation: NewDonation,
    },
}

/// The working buffer behind the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationForm {
    mode: FormMode,
    donor: String,
    donation_type: String,
    value: String,
    date: String,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationForm {
    /// A blank form in add mode, dated today.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: FormMode::Adding,
            donor: String::new(),
            donation_type: String::new(),
            value: String::new(),
            date: today(),
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether an existing donation is being edited.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Raw text of one field.
    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Donor => &self.donor,
            FormField::Type => &self.donation_type,
            FormField::Value => &self.value,
            FormField::Date => &self.date,
        }
    }

    /// Overwrite one field. No validation happens here.
    pub fn set_field(&mut self, field: FormField, raw: impl Into<String>) {
        let raw = raw.into();
        match field {
            FormField::Donor => self.donor = raw,
            FormField::Type => self.donation_type = raw,
            FormField::Value => self.value = raw,
            FormField::Date => self.date = raw,
        }
    }

    /// Load an existing donation into the form for editing.
    pub fn begin_edit(&mut self, record: &DonationRecord) {
        debug!("Editing donation {}", record.id);
        self.mode = FormMode::Editing(record.id.clone());
        self.donor.clone_from(&record.donor);
        self.donation_type = record.donation_type.to_string();
        self.value = record.value.to_string();
        self.date.clone_from(&record.date);
    }

    /// Clear the form back to a blank add form dated today.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Abandon the current add or edit.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validate the buffer and produce the store action it describes.
    ///
    /// The buffer is left untouched; call [`reset`](Self::reset) once the
    /// action has been applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that is missing
    /// or invalid.
    pub fn submit(&self) -> std::result::Result<FormAction, ValidationError> {
        let donor = self.donor.trim();
        if donor.is_empty() {
            return Err(ValidationError::MissingDonor);
        }

        let type_text = self.donation_type.trim();
        if type_text.is_empty() {
            return Err(ValidationError::MissingType);
        }
        let donation_type: DonationType = type_text
            .parse()
            .map_err(|_| ValidationError::UnknownType(type_text.to_string()))?;

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingDate);
        }

        let value = parse_value(&self.value)?;

        let donation = NewDonation {
            donor: donor.to_string(),
            donation_type,
            value,
            date: date.to_string(),
        };

        Ok(match &self.mode {
            FormMode::Adding => FormAction::Add(donation),
            FormMode::Editing(id) => FormAction::Update {
                id: id.clone(),
                donation,
            },
        })
    }

    /// Submit the form into `store`, resetting it once the store has taken
    /// the change.
    ///
    /// An edit whose donation has since disappeared also resets the form,
    /// since there is nothing left to edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the form is
    /// invalid (the buffer is kept for correction), or any store error.
    pub fn apply<B: SlotBackend>(
        &mut self,
        store: &mut DonationStore<B>,
    ) -> Result<DonationRecord> {
        let result = match self.submit()? {
            FormAction::Add(donation) => store.add(donation),
            FormAction::Update { id, donation } => store.update(&id, donation),
        };
        match &result {
            Err(e) if !e.is_not_found() && !e.is_persistence_failure() => {}
            _ => self.reset(),
        }
        result
    }

    /// Form heading.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Adding => "Add Donation",
            FormMode::Editing(_) => "Edit Donation",
        }
    }

    /// Label of the submit button.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Adding => "Add Donation",
            FormMode::Editing(_) => "Save Changes",
        }
    }

    /// Guidance shown for the currently selected type, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self.donation_type.parse::<DonationType>() {
            Ok(t) if t.is_monetary() => Some("For Money, the value is treated as dollars."),
            _ => None,
        }
    }
}

/// Parse value text to a finite number strictly greater than zero.
fn parse_value(raw: &str) -> std::result::Result<f64, ValidationError> {
    let text = raw.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::InvalidValue(text.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue(text.to_string()));
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue(text.to_string()));
    }
    Ok(value)
}

/// Today's calendar date as `YYYY-MM-DD`.
fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
