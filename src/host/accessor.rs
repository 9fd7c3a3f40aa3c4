use std::collections::BTreeMap;

use crate::ease::convert::{KeyframeEase, KeyframeSample};
use crate::foundation::error::CurveResult;

/// Host-assigned identity of a property, stable for the duration of one apply.
///
/// Display names are not unique in a real host ("Position" on two layers), so writes are keyed
/// by this id rather than by name.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(pub usize);

/// A selected keyframe: the host's key index plus its sample.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SelectedKey {
    /// Host key index (opaque to the core, only used for ordering and write-back).
    pub index: usize,
    /// Time and value of the key.
    pub sample: KeyframeSample,
}

/// Selected keyframes on one host property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertySelection {
    /// Identity the host uses to route writes back to this property.
    pub id: PropertyId,
    /// Display name of the property.
    pub name: String,
    /// Selected keys in any order.
    pub keys: Vec<SelectedKey>,
}

/// Snapshot of what the user has selected in the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Selection {
    /// No composition is open.
    NoComposition,
    /// Selected properties of the active composition (possibly none).
    Properties(Vec<PropertySelection>),
}

/// Ease write for one key. `None` leaves that side of the key untouched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyEaseWrite {
    /// Property the key belongs to.
    pub property: PropertyId,
    /// Host key index.
    pub key_index: usize,
    /// New incoming ease, one entry per dimension.
    pub in_ease: Option<Vec<KeyframeEase>>,
    /// New outgoing ease, one entry per dimension.
    pub out_ease: Option<Vec<KeyframeEase>>,
}

/// Every ease write produced by one apply, handed to the host in a single call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EasePlan {
    writes: BTreeMap<(PropertyId, usize), KeyEaseWrite>,
}

impl EasePlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outgoing ease of `key_index` on `property`.
    pub fn set_out(&mut self, property: PropertyId, key_index: usize, ease: Vec<KeyframeEase>) {
        self.entry(property, key_index).out_ease = Some(ease);
    }

    /// Set the incoming ease of `key_index` on `property`.
    pub fn set_in(&mut self, property: PropertyId, key_index: usize, ease: Vec<KeyframeEase>) {
        self.entry(property, key_index).in_ease = Some(ease);
    }

    /// Planned write for one key, if any.
    pub fn get(&self, property: PropertyId, key_index: usize) -> Option<&KeyEaseWrite> {
        self.writes.get(&(property, key_index))
    }

    /// All writes ordered by property id, then key index.
    pub fn writes(&self) -> impl Iterator<Item = &KeyEaseWrite> {
        self.writes.values()
    }

    /// Number of keys touched.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether the plan touches no key.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    fn entry(&mut self, property: PropertyId, key_index: usize) -> &mut KeyEaseWrite {
        self.writes
            .entry((property, key_index))
            .or_insert_with(|| KeyEaseWrite {
                property,
                key_index,
                in_ease: None,
                out_ease: None,
            })
    }
}

impl serde::Serialize for EasePlan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.writes.values())
    }
}

/// Request/response boundary to the animation host.
///
/// Implementations must apply a plan all-or-nothing: if `write_ease` fails, no key may show a
/// partially applied ease.
pub trait HostAccessor {
    /// Read the current composition selection.
    fn read_selection(&mut self) -> CurveResult<Selection>;

    /// Apply every write in `plan` as one undoable step.
    fn write_ease(&mut self, plan: &EasePlan) -> CurveResult<()>;
}
