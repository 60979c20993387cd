//! Pad families
//!
//! The Tangier pin controller splits its pads into families. Every family
//! owns one fixed-size register bank inside the controller's address window,
//! and a contiguous run of global pad numbers.

use crate::error::{Error, Result};

/// Address span of one family's register bank.
pub const BANK_STRIDE: u32 = 0x400;

/// Offset of the per-pad buffer configuration words inside a bank.
pub const BUF_OFFSET: u32 = 0x100;

/// Size of one buffer configuration word.
pub const WORD_SIZE: u32 = 4;

/// Most pads a single bank can hold.
pub const MAX_FAMILY_PADS: u32 = (BANK_STRIDE - BUF_OFFSET) / WORD_SIZE;

/// Unbound family descriptor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Family {
    /// Bank slot inside the controller window.
    pub id: u32,
    /// First global pad number owned by this family.
    pub pad_base: u32,
    /// Number of pads owned by this family.
    pub pad_count: u32,
}

impl Family {
    /// Describe a family owning pads `first..=last`.
    ///
    /// # Panics
    ///
    /// Panics if `last < first`, or if the range covers every `u32`. In a
    /// `const` table this is a compile error.
    pub const fn new(id: u32, first: u32, last: u32) -> Self {
        assert!(first <= last, "family range ends before it starts");
        assert!(last - first < u32::MAX, "family range too large");

        Self {
            id,
            pad_base: first,
            pad_count: last - first + 1,
        }
    }

    /// Returns true if `pad` falls in this family's range.
    #[inline]
    pub const fn contains(&self, pad: u32) -> bool {
        pad >= self.pad_base && pad - self.pad_base < self.pad_count
    }

    /// One past the last pad, if representable.
    fn pad_end(&self) -> Option<u32> {
        self.pad_base.checked_add(self.pad_count)
    }

    /// Bank address at `base`, if the whole bank fits in the address space.
    fn bank_address(&self, base: u32) -> Option<u32> {
        let bank = base.checked_add(self.id.checked_mul(BANK_STRIDE)?)?;
        bank.checked_add(BANK_STRIDE - 1).map(|_| bank)
    }

    fn overlaps(&self, other: &Family) -> bool {
        match (self.pad_end(), other.pad_end()) {
            (Some(end), Some(other_end)) => self.pad_base < other_end && other.pad_base < end,
            _ => true,
        }
    }
}

/// SD/SDIO and I2C families, the only ones configured on Tangier.
pub const TANGIER_FAMILIES: &[Family] = &[Family::new(3, 37, 56), Family::new(7, 101, 114)];

/// A family bound to a controller base address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundFamily {
    /// Family descriptor
    pub family: Family,
    /// Physical address of the family's register bank.
    pub bank_address: u32,
}

impl BoundFamily {
    /// Address of the buffer configuration word for `pad`.
    ///
    /// Returns `None` if `pad` is not owned by this family or the word lies
    /// outside the address space.
    #[inline]
    pub fn bufcfg(&self, pad: u32) -> Option<u32> {
        if !self.family.contains(pad) {
            return None;
        }
        let bufno = pad - self.family.pad_base;
        self.bank_address
            .checked_add(BUF_OFFSET)?
            .checked_add(bufno.checked_mul(WORD_SIZE)?)
    }
}

/// Families of one controller instance, bound to its base address.
///
/// Built once at probe and read-only afterwards.
pub struct Registry<'a> {
    base: u32,
    families: &'a [Family],
}

impl<'a> Registry<'a> {
    /// Bind `families` to the controller at `base`.
    ///
    /// Every family needs a unique id, a non-empty pad range of at most
    /// [`MAX_FAMILY_PADS`] pads that overlaps no other family, and a bank
    /// that fits below `u32::MAX`. The first entry breaking this is returned
    /// as [`Error::InvalidFamily`].
    pub fn bind(base: u32, families: &'a [Family]) -> Result<Self> {
        for (index, family) in families.iter().enumerate() {
            let fits = family.pad_count != 0
                && family.pad_count <= MAX_FAMILY_PADS
                && family.pad_end().is_some()
                && family.bank_address(base).is_some();
            if !fits {
                error!("family {} does not fit at base {:#x}", family.id, base);
                return Err(Error::InvalidFamily(family.id));
            }

            for other in &families[..index] {
                if other.id == family.id {
                    error!("duplicate family id {}", family.id);
                    return Err(Error::InvalidFamily(family.id));
                }
                if other.overlaps(family) {
                    error!("family {} overlaps family {}", family.id, other.id);
                    return Err(Error::InvalidFamily(family.id));
                }
            }
        }

        Ok(Self { base, families })
    }

    /// Iterate over the bound families in table order.
    pub fn iter(&self) -> impl Iterator<Item = BoundFamily> + '_ {
        // Bank addresses were range checked in `bind`.
        self.families.iter().map(move |family| BoundFamily {
            family: *family,
            bank_address: self.base + family.id * BANK_STRIDE,
        })
    }

    /// Find the family owning `pad`.
    pub fn lookup(&self, pad: u32) -> Option<BoundFamily> {
        self.iter().find(|bound| bound.family.contains(pad))
    }
}
