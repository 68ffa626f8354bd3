//! Endian-aware reads of primitive values from byte buffers.
//!
//! Class files store every multi-byte quantity big-endian; [`read_be_at`] decodes one such
//! item and is what [`crate::Parser`] builds on.
//!
//! # Examples
//!
//! ```rust,ignore
//! use jvmscope::file::io::read_be_at;
//!
//! let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x34];
//! let mut offset = 0;
//!
//! let magic: u32 = read_be_at(&data, &mut offset)?;
//! let major: u16 = read_be_at(&data, &mut offset)?;
//! assert_eq!(magic, 0xCAFEBABE);
//! assert_eq!(major, 52);
//! assert_eq!(offset, 6);
//! # Ok::<(), jvmscope::Error>(())
//! ```

use crate::Result;

/// Conversion between primitive numeric types and their byte representations.
///
/// Implemented for every fixed-size integer and float type the class-file format uses.
pub trait ClassIO: Sized {
    /// Byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_class_io {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl ClassIO for $ty {
                type Bytes = [u8; $len];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_class_io!(
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
);

/// Reads a big-endian `T` at `offset` and advances the offset past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: ClassIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let read = take::<T>(data, offset)?;
    Ok(T::from_be_bytes(read))
}

fn take<T: ClassIO>(data: &[u8], offset: &mut usize) -> Result<T::Bytes> {
    let end = offset
        .checked_add(std::mem::size_of::<T>())
        .ok_or(out_of_bounds_error!())?;
    let read = data
        .get(*offset..end)
        .and_then(|bytes| T::Bytes::try_from(bytes).ok())
        .ok_or(out_of_bounds_error!())?;

    *offset = end;
    Ok(read)
}
