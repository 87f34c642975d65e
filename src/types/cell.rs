use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GridError, Result};

/// A unit of content occupying a rectangular extent of the grid.
///
/// A cell spans `row_span × col_span` positions (both at least 1) and
/// carries opaque content: one anonymous value, a keyed content map, an
/// optional style marker, and a set of string hints. Content values are
/// [`serde_json::Value`] so callers can attach anything serializable.
///
/// Spans are set at construction time. The grid's clipping logic may shrink
/// them when a placement is truncated; there is no public span mutation,
/// since an arbitrary span change would break the grid's coverage
/// invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    row_span: u32,
    col_span: u32,
    /// The anonymous content value, for simple cases where a cell holds
    /// just one text or number.
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    /// Keyed content values.
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    content: HashMap<String, Value>,
    /// Opaque style marker interpreted by renderers.
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    /// Free-form rendering hints.
    #[serde(skip_serializing_if = "HashSet::is_empty", default)]
    hints: HashSet<String>,
}

impl Default for Cell {
    /// A plain 1×1 cell with no content.
    fn default() -> Self {
        Self {
            row_span: 1,
            col_span: 1,
            value: None,
            content: HashMap::new(),
            style: None,
            hints: HashSet::new(),
        }
    }
}

impl Cell {
    /// Create a cell spanning the given number of rows and columns.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if either span is 0.
    pub fn new(row_span: u32, col_span: u32) -> Result<Self> {
        if row_span < 1 {
            return Err(GridError::InvalidArgument(
                "row_span must be larger than 0".into(),
            ));
        }
        if col_span < 1 {
            return Err(GridError::InvalidArgument(
                "col_span must be larger than 0".into(),
            ));
        }
        Ok(Self {
            row_span,
            col_span,
            ..Self::default()
        })
    }

    /// Number of rows this cell spans.
    #[inline]
    pub fn row_span(&self) -> u32 {
        self.row_span
    }

    /// Number of columns this cell spans.
    #[inline]
    pub fn col_span(&self) -> u32 {
        self.col_span
    }

    /// Shrink the row span during clipping. Grid-internal.
    pub(crate) fn set_row_span(&mut self, row_span: u32) {
        debug_assert!(row_span >= 1);
        self.row_span = row_span;
    }

    /// Shrink the column span during clipping. Grid-internal.
    pub(crate) fn set_col_span(&mut self, col_span: u32) {
        debug_assert!(col_span >= 1);
        self.col_span = col_span;
    }

    /// Set the anonymous content value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if `value` is JSON null.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        if value.is_null() {
            return Err(GridError::InvalidArgument("value may not be null".into()));
        }
        self.value = Some(value);
        Ok(())
    }

    /// The anonymous content value, if one was set.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Attach a keyed content value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if the key is empty or the
    /// value is JSON null.
    pub fn set_content(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(GridError::InvalidArgument("key may not be empty".into()));
        }
        if value.is_null() {
            return Err(GridError::InvalidArgument("value may not be null".into()));
        }
        self.content.insert(key, value);
        Ok(())
    }

    /// The content value stored under `key`, if any.
    pub fn content(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    /// Whether a content value is stored under `key`.
    pub fn has_content(&self, key: &str) -> bool {
        self.content.contains_key(key)
    }

    /// All keyed content values.
    pub fn contents(&self) -> &HashMap<String, Value> {
        &self.content
    }

    /// Set the style marker.
    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style = Some(style.into());
    }

    /// The style marker, if one was set.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Add a rendering hint.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if the hint is empty.
    pub fn add_hint(&mut self, hint: impl Into<String>) -> Result<()> {
        let hint = hint.into();
        if hint.is_empty() {
            return Err(GridError::InvalidArgument("hint may not be empty".into()));
        }
        self.hints.insert(hint);
        Ok(())
    }

    /// Builder-style variant of [`Cell::set_value`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cell::set_value`].
    pub fn with_value(mut self, value: Value) -> Result<Self> {
        self.set_value(value)?;
        Ok(self)
    }

    /// Builder-style variant of [`Cell::set_content`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cell::set_content`].
    pub fn with_content(mut self, key: impl Into<String>, value: Value) -> Result<Self> {
        self.set_content(key, value)?;
        Ok(self)
    }

    /// Builder-style variant of [`Cell::set_style`].
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.set_style(style);
        self
    }

    /// Builder-style variant of [`Cell::add_hint`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cell::add_hint`].
    pub fn with_hint(mut self, hint: impl Into<String>) -> Result<Self> {
        self.add_hint(hint)?;
        Ok(self)
    }

    /// Whether the given hint is present.
    pub fn has_hint(&self, hint: &str) -> bool {
        self.hints.contains(hint)
    }

    /// All rendering hints.
    pub fn hints(&self) -> &HashSet<String> {
        &self.hints
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_rejects_zero_spans() {
        assert!(Cell::new(0, 1).is_err());
        assert!(Cell::new(1, 0).is_err());
        assert!(Cell::new(1, 1).is_ok());
    }

    #[test]
    fn default_cell_is_1x1_and_empty() {
        let cell = Cell::default();
        assert_eq!(cell.row_span(), 1);
        assert_eq!(cell.col_span(), 1);
        assert!(cell.value().is_none());
        assert!(cell.contents().is_empty());
        assert!(cell.hints().is_empty());
    }

    #[test]
    fn content_round_trip() {
        let mut cell = Cell::new(2, 3).unwrap();
        cell.set_content("amount", json!(42)).unwrap();
        cell.set_value(json!("hello")).unwrap();
        assert!(cell.has_content("amount"));
        assert_eq!(cell.content("amount"), Some(&json!(42)));
        assert_eq!(cell.value(), Some(&json!("hello")));
        assert!(!cell.has_content("missing"));
    }

    #[test]
    fn null_and_empty_rejected() {
        let mut cell = Cell::default();
        assert!(cell.set_value(Value::Null).is_err());
        assert!(cell.set_content("", json!(1)).is_err());
        assert!(cell.set_content("k", Value::Null).is_err());
        assert!(cell.add_hint("").is_err());
    }

    #[test]
    fn builder_chain() {
        let cell = Cell::new(1, 2)
            .unwrap()
            .with_value(json!("total"))
            .unwrap()
            .with_style("emphasis")
            .with_hint("right-align")
            .unwrap();
        assert_eq!(cell.value(), Some(&json!("total")));
        assert_eq!(cell.style(), Some("emphasis"));
        assert!(cell.has_hint("right-align"));
    }

    #[test]
    fn hints_and_style() {
        let mut cell = Cell::default();
        cell.add_hint("right-align").unwrap();
        cell.set_style("header");
        assert!(cell.has_hint("right-align"));
        assert!(!cell.has_hint("left-align"));
        assert_eq!(cell.style(), Some("header"));
    }
}
