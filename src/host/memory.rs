use std::path::Path;

use anyhow::Context as _;

use crate::ease::convert::{KeyframeEase, KeyframeSample};
use crate::foundation::error::{CurveError, CurveResult};
use crate::host::accessor::{
    EasePlan, HostAccessor, KeyEaseWrite, PropertyId, PropertySelection, SelectedKey, Selection,
};

/// Influence a freshly created key carries on both sides (one sixth of the interval).
pub const DEFAULT_INFLUENCE: f64 = 100.0 / 6.0;

/// A key held by [`InMemoryHost`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InMemoryKey {
    /// Time and value.
    pub sample: KeyframeSample,
    /// Incoming ease, one entry per dimension.
    #[serde(default)]
    pub in_ease: Vec<KeyframeEase>,
    /// Outgoing ease, one entry per dimension.
    #[serde(default)]
    pub out_ease: Vec<KeyframeEase>,
    /// Whether the key is part of the selection.
    #[serde(default)]
    pub selected: bool,
}

impl InMemoryKey {
    /// A key with default eases on both sides.
    pub fn new(sample: KeyframeSample, selected: bool) -> Self {
        let ease = vec![
            KeyframeEase {
                speed: 0.0,
                influence: DEFAULT_INFLUENCE,
            };
            sample.value.dims()
        ];
        Self {
            sample,
            in_ease: ease.clone(),
            out_ease: ease,
            selected,
        }
    }
}

/// A property held by [`InMemoryHost`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InMemoryProperty {
    /// Property name; unique within the host.
    pub name: String,
    /// Whether the property is selected.
    #[serde(default)]
    pub selected: bool,
    /// Keys in host order; the key index is the position in this list.
    pub keys: Vec<InMemoryKey>,
}

/// In-memory host for tests, demos and offline conversion.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct InMemoryHost {
    /// Whether a composition is open.
    #[serde(default = "default_true")]
    pub composition_open: bool,
    /// Properties of the open composition; a property's [`PropertyId`] is its position here.
    #[serde(default)]
    pub properties: Vec<InMemoryProperty>,
    #[serde(skip)]
    fail_writes: bool,
    #[serde(skip)]
    reads: usize,
    #[serde(skip)]
    writes: usize,
}

fn default_true() -> bool {
    true
}

impl InMemoryHost {
    /// An open, empty composition.
    pub fn new() -> Self {
        Self {
            composition_open: true,
            ..Self::default()
        }
    }

    /// A host without an open composition.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Load a host snapshot from JSON text.
    ///
    /// Property names must be unique, since [`InMemoryHost::property`] looks them up by name.
    pub fn from_json_str(json: &str) -> CurveResult<Self> {
        let host: Self = serde_json::from_str(json).map_err(|e| CurveError::serde(e.to_string()))?;
        for (i, prop) in host.properties.iter().enumerate() {
            if host.properties[..i].iter().any(|p| p.name == prop.name) {
                return Err(CurveError::validation(format!(
                    "duplicate property name '{}'",
                    prop.name
                )));
            }
        }
        Ok(host)
    }

    /// Load a host snapshot from a JSON file.
    pub fn from_path(path: &Path) -> CurveResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read host snapshot '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize the current state as pretty JSON.
    pub fn to_json_string(&self) -> CurveResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CurveError::serde(e.to_string()))
    }

    /// Add a property and return its id. Names must be unique within the host.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        selected: bool,
    ) -> CurveResult<PropertyId> {
        let name = name.into();
        if self.property(&name).is_some() {
            return Err(CurveError::validation(format!(
                "duplicate property name '{name}'"
            )));
        }
        self.properties.push(InMemoryProperty {
            name,
            selected,
            keys: Vec::new(),
        });
        Ok(PropertyId(self.properties.len() - 1))
    }

    /// Append a key to the property `prop` and return its key index.
    ///
    /// # Panics
    ///
    /// Panics if `prop` was not returned by this host's [`InMemoryHost::add_property`].
    pub fn add_key(&mut self, prop: PropertyId, sample: KeyframeSample, selected: bool) -> usize {
        let keys = &mut self.properties[prop.0].keys;
        keys.push(InMemoryKey::new(sample, selected));
        keys.len() - 1
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&InMemoryProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Make every subsequent `write_ease` fail, simulating a host that went away.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of `read_selection` calls served.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Number of successful `write_ease` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_write(&self, w: &KeyEaseWrite) -> CurveResult<()> {
        let prop = self
            .properties
            .get(w.property.0)
            .ok_or_else(|| CurveError::host(format!("unknown property id {}", w.property.0)))?;
        let key = prop.keys.get(w.key_index).ok_or_else(|| {
            CurveError::host(format!(
                "property '{}' has no key {}",
                prop.name, w.key_index
            ))
        })?;
        let dims = key.sample.value.dims();
        for ease in w.in_ease.iter().chain(w.out_ease.iter()) {
            if ease.len() != dims {
                return Err(CurveError::host(format!(
                    "ease for '{}' key {} has {} entries, expected {dims}",
                    prop.name,
                    w.key_index,
                    ease.len()
                )));
            }
        }
        Ok(())
    }
}

impl HostAccessor for InMemoryHost {
    fn read_selection(&mut self) -> CurveResult<Selection> {
        self.reads += 1;
        if !self.composition_open {
            return Ok(Selection::NoComposition);
        }
        let props = self
            .properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.selected)
            .map(|(id, p)| PropertySelection {
                id: PropertyId(id),
                name: p.name.clone(),
                keys: p
                    .keys
                    .iter()
                    .enumerate()
                    .filter(|(_, k)| k.selected)
                    .map(|(index, k)| SelectedKey {
                        index,
                        sample: k.sample.clone(),
                    })
                    .collect(),
            })
            .collect();
        Ok(Selection::Properties(props))
    }

    fn write_ease(&mut self, plan: &EasePlan) -> CurveResult<()> {
        if self.fail_writes {
            return Err(CurveError::host("host rejected the ease write"));
        }
        // Validate everything first so a bad entry leaves every key untouched.
        for w in plan.writes() {
            self.check_write(w)?;
        }
        for w in plan.writes() {
            let Some(key) = self
                .properties
                .get_mut(w.property.0)
                .and_then(|p| p.keys.get_mut(w.key_index))
            else {
                continue;
            };
            if let Some(ease) = &w.in_ease {
                key.in_ease = ease.clone();
            }
            if let Some(ease) = &w.out_ease {
                key.out_ease = ease.clone();
            }
        }
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
