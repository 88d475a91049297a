//! GasCategory - closed set of operation tags for gas consumption
//!
//! Every consumption call carries a category. Two categories are scalable:
//! - WritePerByte: per-byte cost of a store write
//! - ReadPerByte: per-byte cost of a store read
//!
//! Scalable categories are priced through the logarithmic schedule, every
//! other category (including unrecognized labels) is charged 1:1.

use serde::{Deserialize, Serialize};

/// Version of the descriptor set below. Bump whenever a descriptor string
/// or the scalable subset changes, since both affect state-transition costs.
pub const DESCRIPTOR_SET_VERSION: u32 = 1;

pub const GAS_HAS_DESC: &str = "Has";
pub const GAS_DELETE_DESC: &str = "Delete";
pub const GAS_READ_COST_FLAT_DESC: &str = "ReadFlat";
pub const GAS_READ_PER_BYTE_DESC: &str = "ReadPerByte";
pub const GAS_WRITE_COST_FLAT_DESC: &str = "WriteFlat";
pub const GAS_WRITE_PER_BYTE_DESC: &str = "WritePerByte";
pub const GAS_ITER_NEXT_COST_FLAT_DESC: &str = "IterNextFlat";
pub const GAS_VALUE_PER_BYTE_DESC: &str = "ValuePerByte";
pub const GAS_TX_SIZE_DESC: &str = "txSize";

/// Operation category attached to a gas consumption call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GasCategory {
    Has,
    Delete,
    ReadFlat,
    ReadPerByte,
    WriteFlat,
    WritePerByte,
    IterNextFlat,
    ValuePerByte,
    TxSize,
    /// Any label outside the fixed set; always identity-priced
    Other(String),
}

impl GasCategory {
    /// Category for callers that do not label their consumption
    pub fn unlabeled() -> Self {
        GasCategory::Other(String::new())
    }

    /// Free-form category, parsed so known labels still map to their tag
    pub fn other(label: impl Into<String>) -> Self {
        Self::from_descriptor(&label.into())
    }

    /// Fixed descriptor string for this category
    pub fn descriptor(&self) -> &str {
        match self {
            GasCategory::Has => GAS_HAS_DESC,
            GasCategory::Delete => GAS_DELETE_DESC,
            GasCategory::ReadFlat => GAS_READ_COST_FLAT_DESC,
            GasCategory::ReadPerByte => GAS_READ_PER_BYTE_DESC,
            GasCategory::WriteFlat => GAS_WRITE_COST_FLAT_DESC,
            GasCategory::WritePerByte => GAS_WRITE_PER_BYTE_DESC,
            GasCategory::IterNextFlat => GAS_ITER_NEXT_COST_FLAT_DESC,
            GasCategory::ValuePerByte => GAS_VALUE_PER_BYTE_DESC,
            GasCategory::TxSize => GAS_TX_SIZE_DESC,
            GasCategory::Other(label) => label,
        }
    }

    /// Parse a descriptor; unknown labels become `Other`
    pub fn from_descriptor(desc: &str) -> Self {
        match desc {
            GAS_HAS_DESC => GasCategory::Has,
            GAS_DELETE_DESC => GasCategory::Delete,
            GAS_READ_COST_FLAT_DESC => GasCategory::ReadFlat,
            GAS_READ_PER_BYTE_DESC => GasCategory::ReadPerByte,
            GAS_WRITE_COST_FLAT_DESC => GasCategory::WriteFlat,
            GAS_WRITE_PER_BYTE_DESC => GasCategory::WritePerByte,
            GAS_ITER_NEXT_COST_FLAT_DESC => GasCategory::IterNextFlat,
            GAS_VALUE_PER_BYTE_DESC => GasCategory::ValuePerByte,
            GAS_TX_SIZE_DESC => GasCategory::TxSize,
            other => GasCategory::Other(other.to_string()),
        }
    }

    /// Whether consumption in this category goes through the sub-linear transform
    #[inline]
    pub fn is_scalable(&self) -> bool {
        matches!(self, GasCategory::WritePerByte | GasCategory::ReadPerByte)
    }
}

impl Default for GasCategory {
    fn default() -> Self {
        GasCategory::unlabeled()
    }
}

impl std::fmt::Display for GasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descriptor())
    }
}

impl From<&str> for GasCategory {
    fn from(desc: &str) -> Self {
        Self::from_descriptor(desc)
    }
}

impl From<String> for GasCategory {
    fn from(desc: String) -> Self {
        Self::from_descriptor(&desc)
    }
}

impl From<GasCategory> for String {
    fn from(category: GasCategory) -> Self {
        match category {
            GasCategory::Other(label) => label,
            known => known.descriptor().to_string(),
        }
    }
}
