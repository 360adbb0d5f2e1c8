//! Static field schemas for partial updates
//!
//! Every record type names its fields in a closed enum. A patch is a JSON
//! object of `field name -> value`; each entry is resolved against the enum
//! and applied independently, so one bad field never blocks the others.
//!
//! ## Outcomes per field
//!
//! | Situation | Result |
//! |-----------|--------|
//! | name not in schema | rejected, [`FieldIssue::Unknown`] |
//! | identity or nested-sequence field | rejected, [`FieldIssue::Immutable`] |
//! | value of the wrong JSON type | rejected, [`FieldIssue::WrongType`] |
//! | otherwise | field overwritten, name listed in `applied` |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A partial update: field name to new value.
pub type Patch = serde_json::Map<String, Value>;

/// Closed set of field names for one record type.
pub trait FieldSchema: Copy + Eq + fmt::Debug + 'static {
    /// Every field, in declaration order
    const ALL: &'static [Self];

    /// Wire name of the field
    fn name(self) -> &'static str;

    /// Whether a patch may overwrite this field
    fn is_mutable(self) -> bool;

    /// Resolve a wire name against the schema
    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// A record that accepts per-field writes.
pub trait Patchable {
    /// Schema of this record's fields
    type Field: FieldSchema;

    /// Overwrite one mutable field.
    ///
    /// Only called for fields whose `is_mutable()` is true.
    fn set_field(&mut self, field: Self::Field, value: Value) -> Result<(), FieldIssue>;
}

/// Why a patch entry was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssue {
    /// Field is not part of the record's schema
    Unknown,
    /// Field exists but cannot be patched
    Immutable,
    /// Value has a JSON type the field cannot hold
    WrongType,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldIssue::Unknown => "unknown field",
            FieldIssue::Immutable => "field is not patchable",
            FieldIssue::WrongType => "value has the wrong type",
        };
        f.write_str(s)
    }
}

/// A rejected patch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidField {
    /// Field name as given in the patch
    pub field: String,
    /// Reason for rejection
    pub issue: FieldIssue,
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid field '{}': {}", self.field, self.issue)
    }
}

/// Per-field outcome of applying a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    /// Fields that were overwritten
    pub applied: Vec<String>,
    /// Fields that were rejected
    pub rejected: Vec<InvalidField>,
}

impl PatchReport {
    /// True when no field was rejected
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A record after a patch, with the per-field report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patched<R> {
    /// Record as persisted
    pub record: R,
    /// What happened to each patch entry
    pub report: PatchReport,
}

/// Apply every entry of `patch` to `record`, collecting per-field outcomes.
pub fn apply_patch<R: Patchable>(record: &mut R, patch: &Patch) -> PatchReport {
    let mut report = PatchReport::default();
    for (name, value) in patch {
        let outcome = match R::Field::parse(name) {
            None => Err(FieldIssue::Unknown),
            Some(field) if !field.is_mutable() => Err(FieldIssue::Immutable),
            Some(field) => record.set_field(field, value.clone()),
        };
        match outcome {
            Ok(()) => report.applied.push(name.clone()),
            Err(issue) => report.rejected.push(InvalidField {
                field: name.clone(),
                issue,
            }),
        }
    }
    report
}

/// Fields of a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchField {
    /// `watchID`, assigned at creation
    WatchId,
    /// `refNumber`
    RefNumber,
    /// `brand`
    Brand,
    /// `model`
    Model,
    /// `movement`
    Movement,
    /// `description`
    Description,
    /// `msrp`
    Msrp,
    /// `appraisal`
    Appraisal,
    /// `acquisitionDate`
    AcquisitionDate,
    /// `color`
    Color,
}

impl FieldSchema for WatchField {
    const ALL: &'static [Self] = &[
        WatchField::WatchId,
        WatchField::RefNumber,
        WatchField::Brand,
        WatchField::Model,
        WatchField::Movement,
        WatchField::Description,
        WatchField::Msrp,
        WatchField::Appraisal,
        WatchField::AcquisitionDate,
        WatchField::Color,
    ];

    fn name(self) -> &'static str {
        match self {
            WatchField::WatchId => "watchID",
            WatchField::RefNumber => "refNumber",
            WatchField::Brand => "brand",
            WatchField::Model => "model",
            WatchField::Movement => "movement",
            WatchField::Description => "description",
            WatchField::Msrp => "msrp",
            WatchField::Appraisal => "appraisal",
            WatchField::AcquisitionDate => "acquisitionDate",
            WatchField::Color => "color",
        }
    }

    fn is_mutable(self) -> bool {
        !matches!(self, WatchField::WatchId)
    }
}

/// Fields of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionField {
    /// `owner`
    Owner,
    /// `watches`, managed through the nested-record operations
    Watches,
}

impl FieldSchema for CollectionField {
    const ALL: &'static [Self] = &[CollectionField::Owner, CollectionField::Watches];

    fn name(self) -> &'static str {
        match self {
            CollectionField::Owner => "owner",
            CollectionField::Watches => "watches",
        }
    }

    fn is_mutable(self) -> bool {
        matches!(self, CollectionField::Owner)
    }
}

/// Fields of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderField {
    /// `brand`
    Brand,
    /// `website`
    Website,
    /// `countryOrigin`
    CountryOrigin,
    /// `stockWatches`, managed through the nested-record operations
    StockWatches,
}

impl FieldSchema for ProviderField {
    const ALL: &'static [Self] = &[
        ProviderField::Brand,
        ProviderField::Website,
        ProviderField::CountryOrigin,
        ProviderField::StockWatches,
    ];

    fn name(self) -> &'static str {
        match self {
            ProviderField::Brand => "brand",
            ProviderField::Website => "website",
            ProviderField::CountryOrigin => "countryOrigin",
            ProviderField::StockWatches => "stockWatches",
        }
    }

    fn is_mutable(self) -> bool {
        !matches!(self, ProviderField::StockWatches)
    }
}
