#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Feature flags
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod error;
pub mod family;
pub mod mmio;
pub mod node;
pub mod pinctrl;
pub mod scu;

// Reexports
pub use embassy_hal_internal::{into_ref, Peripheral, PeripheralRef};
pub use error::{Error, Result};
pub use pinctrl::{Pinctrl, Summary};

/// Devicetree compatible string of the Tangier pin controller.
pub const COMPATIBLE: &str = "intel,pinctrl-tangier";

embassy_hal_internal::peripherals!(PINCTRL);

/// HAL configuration for Tangier.
pub mod config {
    use crate::family::{Family, TANGIER_FAMILIES};

    /// Physical base of the Tangier pin configuration window.
    pub const TANGIER_PINCONF_BASE: u32 = 0xff0c_0000;

    /// Pin controller configuration passed when binding.
    #[non_exhaustive]
    pub struct Config<'a> {
        /// Controller base address.
        pub base: u32,
        /// Families served by this controller, with disjoint pad ranges.
        pub families: &'a [Family],
    }

    impl Default for Config<'static> {
        fn default() -> Self {
            Self {
                base: TANGIER_PINCONF_BASE,
                families: TANGIER_FAMILIES,
            }
        }
    }

    impl<'a> Config<'a> {
        /// Create a new configuration for the controller at `base`.
        pub fn new(base: u32, families: &'a [Family]) -> Self {
            Self { base, families }
        }
    }
}

/// Initialize the `embassy-tangier` HAL.
///
/// This returns the peripheral singletons that can be used for creating drivers.
///
/// This should only be called once at startup, otherwise it panics.
pub fn init() -> Peripherals {
    Peripherals::take()
}
