//! # wasm-encode
//!
//! Low-level writers for the [WebAssembly](https://webassembly.github.io/spec/core/binary/)
//! binary format: LEB128 integers, little-endian floats, names, vectors and sections.
//!
//! Every writer is generic over [`std::io::Write`] and returns the number of bytes it wrote.
//! The [`WasmWriteExt`] trait exposes the same writers as methods on any writer:
//!
//! ```
//! use wasm_encode::WasmWriteExt;
//!
//! let mut buf: Vec<u8> = vec![];
//! buf.write_section(0x01, &[0x01, 0x60, 0x00, 0x00]).unwrap();
//! assert_eq!(buf, [0x01, 0x04, 0x01, 0x60, 0x00, 0x00]);
//! ```

mod ext;
mod leb128;

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

pub use crate::ext::WasmWriteExt;
pub use crate::leb128::*;

/// Write a 32-bit float as its 4-byte little-endian IEEE 754 representation.
#[inline]
pub fn write_f32_le<W>(out: &mut W, value: f32) -> io::Result<usize>
where
    W: io::Write + ?Sized,
{
    out.write_f32::<LittleEndian>(value)?;
    Ok(4)
}

/// Write a name as a single length byte followed by its bytes.
///
/// Only ASCII names of up to 255 bytes can be represented this way. Anything else is rejected
/// with [`io::ErrorKind::InvalidInput`].
pub fn write_name<W>(out: &mut W, name: &str) -> io::Result<usize>
where
    W: io::Write + ?Sized,
{
    if !name.is_ascii() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("name `{name}` is not ascii"),
        ));
    }
    let Ok(len) = u8::try_from(name.len()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("name `{name}` is longer than 255 bytes"),
        ));
    };
    out.write_all(&[len])?;
    out.write_all(name.as_bytes())?;
    Ok(name.len() + 1)
}

/// Write a vector: the number of `items`, followed by the concatenated bytes of every item.
pub fn write_vector<W, T>(out: &mut W, items: &[T]) -> io::Result<usize>
where
    W: io::Write + ?Sized,
    T: AsRef<[u8]>,
{
    let mut written = write_u32_leb128(out, vector_len(items.len())?)?;
    for item in items {
        let item = item.as_ref();
        out.write_all(item)?;
        written += item.len();
    }
    Ok(written)
}

/// Write a vector of bytes: the byte count, followed by the bytes themselves.
pub fn write_byte_vector<W>(out: &mut W, bytes: &[u8]) -> io::Result<usize>
where
    W: io::Write + ?Sized,
{
    let written = write_u32_leb128(out, vector_len(bytes.len())?)?;
    out.write_all(bytes)?;
    Ok(written + bytes.len())
}

/// Write a section: its id byte, followed by `payload` framed as a byte vector.
pub fn write_section<W>(out: &mut W, id: u8, payload: &[u8]) -> io::Result<usize>
where
    W: io::Write + ?Sized,
{
    out.write_all(&[id])?;
    Ok(write_byte_vector(out, payload)? + 1)
}

fn vector_len(len: usize) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "vector length does not fit in a u32",
        )
    })
}
