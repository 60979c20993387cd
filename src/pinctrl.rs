//! Pad function multiplexing
//!
//! Every pad has a 32-bit buffer configuration word in its family's bank. The
//! low three bits select the pad function; the remaining bits hold electrical
//! settings that are left untouched here.
//!
//! Pads in unprotected banks are written directly. Pads in access-gated banks
//! are written by the SCU on the host's behalf, see [`crate::scu`].

use embassy_hal_internal::{into_ref, PeripheralRef};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::family::Registry;
use crate::mmio::RegisterBus;
use crate::node::{PadConfig, PadNode};
use crate::peripherals::PINCTRL;
use crate::scu::Scu;
use crate::Peripheral;

/// Function-select field of a buffer configuration word.
pub const PINMODE_MASK: u32 = 0x07;

/// Merge `bits` into `current` under `mask`.
///
/// Bits outside `mask` keep their value from `current`, bits inside take the
/// value from `bits`.
#[inline]
pub const fn compute_updated_value(current: u32, mask: u32, bits: u32) -> u32 {
    (current & !mask) | (bits & mask)
}

/// How a buffer configuration word is committed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WritePath {
    /// Memory-mapped write from the host.
    Direct,
    /// Indirect write issued by the SCU.
    Protected,
}

impl From<bool> for WritePath {
    fn from(protected: bool) -> Self {
        match protected {
            true => Self::Protected,
            false => Self::Direct,
        }
    }
}

/// Outcome of a configuration pass.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Summary {
    /// Pads set up successfully.
    pub configured: usize,
    /// Pads left in their previous state.
    pub failed: usize,
}

/// Tangier pin controller driver.
pub struct Pinctrl<'d, B: RegisterBus, S: Scu> {
    _peripheral: PeripheralRef<'d, PINCTRL>,
    registry: Registry<'d>,
    bus: B,
    scu: S,
}

impl<'d, B: RegisterBus, S: Scu> Pinctrl<'d, B, S> {
    /// Bind the controller's families to `config.base`.
    ///
    /// Fails with [`Error::InvalidFamily`] if the family table cannot be
    /// bound, see [`Registry::bind`].
    pub fn new(peripheral: impl Peripheral<P = PINCTRL> + 'd, config: Config<'d>, bus: B, scu: S) -> Result<Self> {
        into_ref!(peripheral);

        Ok(Self {
            _peripheral: peripheral,
            registry: Registry::bind(config.base, config.families)?,
            bus,
            scu,
        })
    }

    /// Families bound to this controller.
    pub fn registry(&self) -> &Registry<'d> {
        &self.registry
    }

    /// Address of the buffer configuration word of `pad`.
    pub fn resolve_register(&self, pad: u32) -> Result<u32> {
        match self.registry.lookup(pad).and_then(|family| family.bufcfg(pad)) {
            Some(bufcfg) => Ok(bufcfg),
            None => {
                error!("failed to find family for pin {}", pad);
                Err(Error::UnknownPad(pad))
            }
        }
    }

    /// Resolve `pad` and compute its new word. Returns `(address, value)`.
    fn read_and_update(&mut self, pad: u32, mask: u32, bits: u32) -> Result<(u32, u32)> {
        let bufcfg = self.resolve_register(pad)?;
        let value = compute_updated_value(self.bus.read32(bufcfg), mask, bits);

        debug!("bufcfg:{:#x}, v:{:#x} bits:{:#x} mask:{:#x}", bufcfg, value, bits, mask);
        Ok((bufcfg, value))
    }

    /// Update `pad` under `mask` through `path`.
    pub fn write(&mut self, path: WritePath, pad: u32, mask: u32, bits: u32) -> Result<()> {
        let (bufcfg, value) = self.read_and_update(pad, mask, bits)?;

        match path {
            WritePath::Direct => {
                self.bus.write32(bufcfg, value);
                Ok(())
            }
            WritePath::Protected => self.scu.indirect_write(bufcfg, value),
        }
    }

    /// Update `pad` under `mask` with a memory-mapped write.
    pub fn write_direct(&mut self, pad: u32, mask: u32, bits: u32) -> Result<()> {
        self.write(WritePath::Direct, pad, mask, bits)
    }

    /// Update `pad` under `mask` through an SCU indirect write.
    ///
    /// A failed write is not retried; the pad keeps its previous setting.
    pub fn write_protected(&mut self, pad: u32, mask: u32, bits: u32) -> Result<()> {
        self.write(WritePath::Protected, pad, mask, bits)
    }

    /// Select function `mode` on `pad`.
    ///
    /// Modes outside `0..=7` are rejected before anything is read or written.
    pub fn configure_pad(&mut self, pad: u32, mode: u32, protected: bool) -> Result<()> {
        let ret = if mode & !PINMODE_MASK != 0 {
            Err(Error::UnsupportedMode(mode))
        } else {
            self.write(WritePath::from(protected), pad, PINMODE_MASK, mode)
        };

        if let Err(e) = ret {
            error!("Failed to set mode for pin {} ({:?})", pad, e);
        }
        ret
    }

    /// Apply one parsed pad configuration.
    pub fn configure(&mut self, config: &PadConfig) -> Result<()> {
        self.configure_pad(config.pad, config.mode, config.protected)
    }

    /// Configure every node in order.
    ///
    /// A failing node is logged and skipped; the pass always runs to the end.
    pub fn configure_all<N, I>(&mut self, nodes: I) -> Summary
    where
        N: PadNode,
        I: IntoIterator<Item = N>,
    {
        let mut summary = Summary::default();

        for (index, node) in nodes.into_iter().enumerate() {
            match PadConfig::from_node(&node).and_then(|config| self.configure(&config)) {
                Ok(()) => summary.configured += 1,
                Err(e) => {
                    error!("invalid configuration for the pin node {}: {:?}", index, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "pinctrl: {} pads configured, {} failed",
            summary.configured, summary.failed
        );
        summary
    }
}

/// Bind a controller and configure all of its pad nodes.
///
/// Returns the per-pad summary; pad failures never fail the probe. Only an
/// unusable family table does, before any pad is touched.
pub fn probe<'d, N, B, S>(
    peripheral: impl Peripheral<P = PINCTRL> + 'd,
    config: Config<'d>,
    nodes: impl IntoIterator<Item = N>,
    bus: B,
    scu: S,
) -> Result<Summary>
where
    N: PadNode,
    B: RegisterBus,
    S: Scu,
{
    Ok(Pinctrl::new(peripheral, config, bus, scu)?.configure_all(nodes))
}
