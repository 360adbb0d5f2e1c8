//! Domain records
//!
//! Field names on the wire follow the stored document layout
//! (`watchID`, `refNumber`, `countryOrigin`, `stockWatches`, ...). Scalar
//! fields are free-form JSON values and are omitted when unset.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

use crate::schema::{CollectionField, FieldIssue, Patchable, ProviderField, WatchField};

/// A record that can live under a child key of an aggregate document.
///
/// Both child record types carry one nested sequence of watches. Lookups in
/// that sequence scan by `watchID`; position is never an identifier.
pub trait ChildRecord:
    Patchable + Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static
{
    /// The nested watch sequence
    fn watches(&self) -> &[WatchRecord];

    /// Mutable access to the nested watch sequence
    fn watches_mut(&mut self) -> &mut Vec<WatchRecord>;

    /// Find a nested watch by id
    fn find_watch(&self, watch_id: u64) -> Option<&WatchRecord> {
        self.watches().iter().find(|w| w.watch_id == watch_id)
    }

    /// Find a nested watch by id, mutably
    fn find_watch_mut(&mut self, watch_id: u64) -> Option<&mut WatchRecord> {
        self.watches_mut().iter_mut().find(|w| w.watch_id == watch_id)
    }

    /// Remove a nested watch by id; survivors keep their order
    fn remove_watch(&mut self, watch_id: u64) -> Option<WatchRecord> {
        let pos = self.watches().iter().position(|w| w.watch_id == watch_id)?;
        Some(self.watches_mut().remove(pos))
    }
}

/// A single watch, either in a collection or in a provider's stock.
///
/// Unknown keys are rejected when decoding, matching how a patch reports
/// them as unknown fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WatchRecord {
    /// Globally unique id, assigned at creation
    #[serde(rename = "watchID")]
    pub watch_id: u64,
    /// Manufacturer reference number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<Value>,
    /// Brand name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Value>,
    /// Model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    /// Movement type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Value>,
    /// Free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    /// List price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msrp: Option<Value>,
    /// Appraised value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appraisal: Option<Value>,
    /// When it was acquired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<Value>,
    /// Dial or case color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
}

impl WatchRecord {
    /// Set a scalar field, builder style.
    ///
    /// `WatchField::WatchId` is ignored; ids come from the counter allocator.
    pub fn with(mut self, field: WatchField, value: impl Into<Value>) -> Self {
        if let Some(slot) = self.slot_mut(field) {
            *slot = Some(value.into());
        }
        self
    }

    /// Read a scalar field. Always `None` for `WatchField::WatchId`.
    pub fn field(&self, field: WatchField) -> Option<&Value> {
        match field {
            WatchField::WatchId => None,
            WatchField::RefNumber => self.ref_number.as_ref(),
            WatchField::Brand => self.brand.as_ref(),
            WatchField::Model => self.model.as_ref(),
            WatchField::Movement => self.movement.as_ref(),
            WatchField::Description => self.description.as_ref(),
            WatchField::Msrp => self.msrp.as_ref(),
            WatchField::Appraisal => self.appraisal.as_ref(),
            WatchField::AcquisitionDate => self.acquisition_date.as_ref(),
            WatchField::Color => self.color.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: WatchField) -> Option<&mut Option<Value>> {
        match field {
            WatchField::WatchId => None,
            WatchField::RefNumber => Some(&mut self.ref_number),
            WatchField::Brand => Some(&mut self.brand),
            WatchField::Model => Some(&mut self.model),
            WatchField::Movement => Some(&mut self.movement),
            WatchField::Description => Some(&mut self.description),
            WatchField::Msrp => Some(&mut self.msrp),
            WatchField::Appraisal => Some(&mut self.appraisal),
            WatchField::AcquisitionDate => Some(&mut self.acquisition_date),
            WatchField::Color => Some(&mut self.color),
        }
    }
}

impl Patchable for WatchRecord {
    type Field = WatchField;

    fn set_field(&mut self, field: WatchField, value: Value) -> Result<(), FieldIssue> {
        let slot = self.slot_mut(field).ok_or(FieldIssue::Immutable)?;
        // null clears the field
        *slot = (!value.is_null()).then_some(value);
        Ok(())
    }
}

/// A user's watch collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionRecord {
    /// Owning user
    pub owner: String,
    /// Watches in append order
    pub watches: Vec<WatchRecord>,
}

impl CollectionRecord {
    /// An empty collection for `owner`
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            watches: Vec::new(),
        }
    }
}

impl Patchable for CollectionRecord {
    type Field = CollectionField;

    fn set_field(&mut self, field: CollectionField, value: Value) -> Result<(), FieldIssue> {
        match (field, value) {
            (CollectionField::Owner, Value::String(owner)) => {
                self.owner = owner;
                Ok(())
            }
            (CollectionField::Owner, _) => Err(FieldIssue::WrongType),
            (CollectionField::Watches, _) => Err(FieldIssue::Immutable),
        }
    }
}

impl ChildRecord for CollectionRecord {
    fn watches(&self) -> &[WatchRecord] {
        &self.watches
    }

    fn watches_mut(&mut self) -> &mut Vec<WatchRecord> {
        &mut self.watches
    }
}

/// A watch provider and the watches it stocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderRecord {
    /// Brand the provider sells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Value>,
    /// Provider website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Value>,
    /// Country of origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_origin: Option<Value>,
    /// Stocked watches in append order
    pub stock_watches: Vec<WatchRecord>,
}

impl Patchable for ProviderRecord {
    type Field = ProviderField;

    fn set_field(&mut self, field: ProviderField, value: Value) -> Result<(), FieldIssue> {
        let slot = match field {
            ProviderField::Brand => &mut self.brand,
            ProviderField::Website => &mut self.website,
            ProviderField::CountryOrigin => &mut self.country_origin,
            ProviderField::StockWatches => return Err(FieldIssue::Immutable),
        };
        *slot = (!value.is_null()).then_some(value);
        Ok(())
    }
}

impl ChildRecord for ProviderRecord {
    fn watches(&self) -> &[WatchRecord] {
        &self.stock_watches
    }

    fn watches_mut(&mut self) -> &mut Vec<WatchRecord> {
        &mut self.stock_watches
    }
}
