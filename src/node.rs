//! Pad configuration nodes
//!
//! Each child node of the pin controller describes one pad:
//!
//! | Property     | Type | Required |
//! |--------------|------|----------|
//! | `pad-offset` | u32  | yes      |
//! | `mode-func`  | u32  | yes      |
//! | `protected`  | bool | no       |

use crate::error::{Error, Result};

/// Global pad number.
pub const PAD_OFFSET: &str = "pad-offset";

/// Requested function-select value.
pub const MODE_FUNC: &str = "mode-func";

/// Present when the pad bank is only writable through the SCU.
pub const PROTECTED: &str = "protected";

/// Property reader for one configuration node.
pub trait PadNode {
    /// Read a `u32` property, `None` if absent.
    fn read_u32(&self, name: &str) -> Option<u32>;

    /// Read a boolean property. Absent means false.
    fn read_bool(&self, name: &str) -> bool;
}

/// One pad's requested setup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadConfig {
    /// Global pad number
    pub pad: u32,
    /// Function-select value
    pub mode: u32,
    /// Write through the SCU instead of directly
    pub protected: bool,
}

impl PadConfig {
    /// Create a pad configuration.
    pub const fn new(pad: u32, mode: u32, protected: bool) -> Self {
        Self { pad, mode, protected }
    }

    /// Parse a configuration node.
    pub fn from_node<N: PadNode + ?Sized>(node: &N) -> Result<Self> {
        let pad = node.read_u32(PAD_OFFSET).ok_or(Error::MissingField(PAD_OFFSET))?;
        let mode = node.read_u32(MODE_FUNC).ok_or(Error::MissingField(MODE_FUNC))?;

        Ok(Self {
            pad,
            mode,
            protected: node.read_bool(PROTECTED),
        })
    }
}

impl PadNode for PadConfig {
    fn read_u32(&self, name: &str) -> Option<u32> {
        match name {
            PAD_OFFSET => Some(self.pad),
            MODE_FUNC => Some(self.mode),
            _ => None,
        }
    }

    fn read_bool(&self, name: &str) -> bool {
        name == PROTECTED && self.protected
    }
}

impl<N: PadNode + ?Sized> PadNode for &N {
    fn read_u32(&self, name: &str) -> Option<u32> {
        (**self).read_u32(name)
    }

    fn read_bool(&self, name: &str) -> bool {
        (**self).read_bool(name)
    }
}
