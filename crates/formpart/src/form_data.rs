//! Form data model
//!
//! `FormData` is an ordered multimap of field names to text or binary
//! values. Entries keep their insertion order and a name may appear more
//! than once.

use bytes::Bytes;

/// Binary form value with optional filename and MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Raw content
    pub data: Bytes,
    /// Filename sent in the part's Content-Disposition
    pub filename: Option<String>,
    /// MIME type sent as the part's Content-Type
    pub mime_type: Option<String>,
}

impl Blob {
    /// Create a blob without filename or MIME type
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            filename: None,
            mime_type: None,
        }
    }

    /// Set the filename
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the MIME type
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Size of the content in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A single form value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// Binary field
    Blob(Blob),
}

impl FormValue {
    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            FormValue::Blob(_) => None,
        }
    }

    /// Blob content, if this is a binary value
    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            FormValue::Text(_) => None,
            FormValue::Blob(blob) => Some(blob),
        }
    }

    /// Returns true for binary values
    pub fn is_blob(&self) -> bool {
        matches!(self, FormValue::Blob(_))
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

impl From<Blob> for FormValue {
    fn from(blob: Blob) -> Self {
        FormValue::Blob(blob)
    }
}

/// Ordered multimap of field name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping any existing entries with the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append a text entry
    pub fn append_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.append(name, FormValue::Text(text.into()));
    }

    /// Append a binary entry
    pub fn append_blob(&mut self, name: impl Into<String>, blob: Blob) {
        self.append(name, FormValue::Blob(blob));
    }

    /// Replace every entry named `name` with a single entry
    ///
    /// The new entry takes the position of the first match. If no entry
    /// has that name, the value is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(n, _)| {
                    let keep = index <= first || *n != name;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// First value with the given name
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// All values with the given name, in insertion order
    pub fn get_all(&self, name: &str) -> Vec<&FormValue> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v)
            .collect()
    }

    /// Returns true if any entry has the given name
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Remove every entry with the given name
    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the form has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate entry names in insertion order (duplicates included)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<FormValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        form.extend(iter);
        form
    }
}

impl<K, V> Extend<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<FormValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}
