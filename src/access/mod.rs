//! Access-flag decoding.
//!
//! Class files store the modifiers of classes, fields and methods as a 16 bit mask. This
//! module turns such a mask into the ordered list of symbolic names the builder API expects
//! (`ACC_PUBLIC | ACC_FINAL`).
//!
//! Flag positions are shared between roles. The one that matters for reconstruction is bit
//! 5 (`0x0020`): on a member it means `synchronized`, on a class header it is `ACC_SUPER`.
//! The decoder branches on [`FlagRole`] explicitly for it.
//!
//! # Examples
//!
//! ```rust
//! use jvmscope::access::{decode_access_flags, AccessFlag, AccessFlagSet, FlagRole};
//!
//! let class = decode_access_flags(0x0021, FlagRole::Class)?;
//! assert_eq!(class, AccessFlagSet::Flags(vec![AccessFlag::Public, AccessFlag::Super]));
//!
//! let method = decode_access_flags(0x0021, FlagRole::Member)?;
//! assert_eq!(method.to_string(), "PUBLIC | SYNCHRONIZED");
//!
//! assert!(decode_access_flags(0, FlagRole::Member)?.is_zero());
//! # Ok::<(), jvmscope::Error>(())
//! ```

mod types;

pub use types::*;

use crate::{Error::UnknownFlagBit, Result};

/// Highest bit position with a symbolic name (`ACC_ENUM`).
pub const MAX_FLAG_BIT: u32 = 14;

/// Name table indexed by bit position.
const FLAG_TABLE: [(AccessFlags, AccessFlag); MAX_FLAG_BIT as usize + 1] = [
    (AccessFlags::PUBLIC, AccessFlag::Public),
    (AccessFlags::PRIVATE, AccessFlag::Private),
    (AccessFlags::PROTECTED, AccessFlag::Protected),
    (AccessFlags::STATIC, AccessFlag::Static),
    (AccessFlags::FINAL, AccessFlag::Final),
    (AccessFlags::SYNCHRONIZED, AccessFlag::Synchronized),
    (AccessFlags::VOLATILE, AccessFlag::Volatile),
    (AccessFlags::TRANSIENT, AccessFlag::Transient),
    (AccessFlags::NATIVE, AccessFlag::Native),
    (AccessFlags::INTERFACE, AccessFlag::Interface),
    (AccessFlags::ABSTRACT, AccessFlag::Abstract),
    (AccessFlags::STRICT, AccessFlag::Strict),
    (AccessFlags::SYNTHETIC, AccessFlag::Synthetic),
    (AccessFlags::ANNOTATION, AccessFlag::Annotation),
    (AccessFlags::ENUM, AccessFlag::Enum),
];

/// Decode an access mask into its symbolic flag names.
///
/// Names are produced in ascending bit order. A mask of `0` yields [`AccessFlagSet::Zero`].
///
/// ## Arguments
/// * 'mask' - The raw access mask
/// * 'role' - Whether the mask belongs to a class header or to a member
///
/// # Errors
/// Returns [`crate::Error::UnknownFlagBit`] if a bit above [`MAX_FLAG_BIT`] is set.
pub fn decode_access_flags(mask: u16, role: FlagRole) -> Result<AccessFlagSet> {
    if mask == 0 {
        return Ok(AccessFlagSet::Zero);
    }

    let mut flags = Vec::with_capacity(mask.count_ones() as usize);
    for bit in 0..u16::BITS {
        if mask & (1 << bit) == 0 {
            continue;
        }

        let Some(&(raw, name)) = FLAG_TABLE.get(bit as usize) else {
            return Err(UnknownFlagBit { bit, mask });
        };

        if role == FlagRole::Class && raw == AccessFlags::SUPER {
            flags.push(AccessFlag::Super);
        } else {
            flags.push(name);
        }
    }

    Ok(AccessFlagSet::Flags(flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn table_matches_bit_positions() {
        for (bit, (raw, _)) in FLAG_TABLE.iter().enumerate() {
            assert_eq!(raw.bits(), 1 << bit);
        }
    }

    #[test]
    fn zero_mask_is_sentinel() {
        for role in [FlagRole::Class, FlagRole::Member] {
            let decoded = decode_access_flags(0, role).unwrap();
            assert_eq!(decoded, AccessFlagSet::Zero);
            assert_eq!(decoded.symbols(), vec!["0"]);
            assert_eq!(decoded.to_string(), "0");
        }
    }

    #[test]
    fn synchronized_bit_depends_on_role() {
        let class = decode_access_flags(0x0020, FlagRole::Class).unwrap();
        assert_eq!(class, AccessFlagSet::Flags(vec![AccessFlag::Super]));

        let member = decode_access_flags(0x0020, FlagRole::Member).unwrap();
        assert_eq!(member, AccessFlagSet::Flags(vec![AccessFlag::Synchronized]));
    }

    #[test]
    fn typical_masks() {
        let class = decode_access_flags(0x0421, FlagRole::Class).unwrap();
        assert_eq!(class.symbols(), vec!["PUBLIC", "SUPER", "ABSTRACT"]);

        let field = decode_access_flags(0x0019, FlagRole::Member).unwrap();
        assert_eq!(field.symbols(), vec!["PUBLIC", "STATIC", "FINAL"]);

        let enum_class = decode_access_flags(0x4031, FlagRole::Class).unwrap();
        assert_eq!(enum_class.to_string(), "PUBLIC | FINAL | SUPER | ENUM");
    }

    #[test]
    fn member_flags_ascend_for_all_masks() {
        for mask in 1..=0x7FFF_u16 {
            let decoded = decode_access_flags(mask, FlagRole::Member).unwrap();
            let flags = decoded.flags();

            assert_eq!(flags.len(), mask.count_ones() as usize);
            let positions: Vec<usize> = flags
                .iter()
                .map(|flag| {
                    FLAG_TABLE
                        .iter()
                        .position(|(_, name)| name == flag)
                        .unwrap()
                })
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(!decoded.contains(AccessFlag::Super));
        }
    }

    #[test]
    fn unknown_bit_fails() {
        let result = decode_access_flags(0x8001, FlagRole::Member);
        assert!(matches!(
            result,
            Err(Error::UnknownFlagBit {
                bit: 15,
                mask: 0x8001
            })
        ));

        assert!(decode_access_flags(0x8000, FlagRole::Class).is_err());
    }

    #[test]
    fn constant_names() {
        assert_eq!(AccessFlag::Public.constant_name(), "ACC_PUBLIC");
        assert_eq!(AccessFlag::Super.constant_name(), "ACC_SUPER");
        assert_eq!(AccessFlag::Strict.to_string(), "STRICT");
    }
}
