//! Typed content payloads understood by renderer collaborators.
//!
//! The grid itself treats cell content as opaque [`serde_json::Value`]s.
//! These types are the common payload shapes that renderers know how to
//! interpret; store them in a cell via [`serde_json::to_value`].

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// A hyperlink payload: target address plus display text and an optional
/// tooltip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlContent {
    pub address: String,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tooltip: String,
}

impl UrlContent {
    /// Create a hyperlink payload.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if the address is empty.
    pub fn new(address: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.is_empty() {
            return Err(GridError::InvalidArgument(
                "address may not be empty".into(),
            ));
        }
        Ok(Self {
            address,
            text: text.into(),
            tooltip: String::new(),
        })
    }

    /// Attach a tooltip shown on hover.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }
}

/// An email address payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContent {
    pub address: String,
}

impl EmailContent {
    /// Create an email payload.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if the address is empty.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.is_empty() {
            return Err(GridError::InvalidArgument(
                "address may not be empty".into(),
            ));
        }
        Ok(Self { address })
    }
}

/// A named anchor payload, for links that target a location within the
/// rendered document rather than an external address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAnchor {
    pub address: String,
    pub text: String,
}

impl UrlAnchor {
    /// Create an anchor payload.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArgument`] if the address is empty.
    pub fn new(address: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.is_empty() {
            return Err(GridError::InvalidArgument(
                "address may not be empty".into(),
            ));
        }
        Ok(Self {
            address,
            text: text.into(),
        })
    }
}
