//! System Controller Unit (SCU) IPC
//!
//! Some pad banks are access-gated and can only be written by the SCU. The
//! IPC transport is provided by the platform; this module only defines the
//! commands the pin controller issues through it.

use crate::error::{Error, Result};

/// SCU IPC command opcode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IpcCommand {
    /// Read a register on behalf of the host.
    IndirectRead,
    /// Write a register on behalf of the host.
    IndirectWrite,
}

impl From<IpcCommand> for u8 {
    fn from(cmd: IpcCommand) -> u8 {
        match cmd {
            IpcCommand::IndirectRead => 0x02,
            IpcCommand::IndirectWrite => 0x05,
        }
    }
}

/// Synchronous SCU IPC transport.
pub trait Scu {
    /// Issue `cmd` for the register at `addr` with a one-word payload.
    ///
    /// Returns the transport status, zero on success. Blocks until the SCU
    /// answers or the transport times out.
    fn raw_command(&mut self, cmd: IpcCommand, addr: u32, value: u32) -> i32;

    /// Ask the SCU to write `value` to the register at `addr`.
    fn indirect_write(&mut self, addr: u32, value: u32) -> Result<()> {
        match self.raw_command(IpcCommand::IndirectWrite, addr, value) {
            0 => Ok(()),
            status => Err(Error::SecureWriteFailed(status)),
        }
    }
}

impl<S: Scu> Scu for &mut S {
    fn raw_command(&mut self, cmd: IpcCommand, addr: u32, value: u32) -> i32 {
        (**self).raw_command(cmd, addr, value)
    }
}
