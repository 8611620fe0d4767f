use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::errors::SessionError;

/// Reserved session key under which flash messages are persisted.
pub const FLASH_KEY: &str = "_flash_";

/// Flash messages grouped by category.
///
/// Categories are free-form; "success", "info", "warning" and "error" are the
/// usual ones since they map onto CSS classes. Messages keep the order in which
/// they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flashes(BTreeMap<String, Vec<String>>);

impl Flashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages queued under `category`, oldest first.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    pub(crate) fn push(&mut self, category: &str, message: String) {
        self.0.entry(category.to_string()).or_default().push(message);
    }
}

impl From<BTreeMap<String, Vec<String>>> for Flashes {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl IntoIterator for Flashes {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Flashes {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Contents of one session as handed out by a [`SessionStore`](crate::SessionStore).
///
/// The flash slot is a typed field rather than an entry of `values`; on the wire
/// it still shows up as the reserved `_flash_` key next to the other values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(skip)]
    pub(crate) id: Option<String>,

    #[serde(skip)]
    pub(crate) is_new: bool,

    #[serde(rename = "_flash_", default, skip_serializing_if = "Option::is_none")]
    pub(crate) flash: Option<Flashes>,

    #[serde(flatten)]
    pub(crate) values: HashMap<String, Value>,
}

impl SessionData {
    /// A fresh session for a request that did not present one.
    pub fn new() -> Self {
        Self {
            is_new: true,
            ..Default::default()
        }
    }

    /// True if no valid session existed in the request.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Store-assigned identifier, if the store uses one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// True when there are no values and no queued flash messages.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.flash.is_none()
    }

    /// A session is written back unless it is both new and empty.
    ///
    /// A pre-existing session that was emptied during the request is still
    /// written, which clears what the store holds for it.
    pub fn should_persist(&self) -> bool {
        !(self.is_new && self.is_empty())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        self.values
            .get(key)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(|e| SessionError::Serde(e.to_string()))
    }

    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), SessionError> {
        if key == FLASH_KEY {
            return Err(SessionError::ReservedKey(key.to_string()));
        }
        let value = serde_json::to_value(value).map_err(|e| SessionError::Serde(e.to_string()))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Queued flash messages, without consuming them.
    pub fn flashes(&self) -> Option<&Flashes> {
        self.flash.as_ref()
    }
}
