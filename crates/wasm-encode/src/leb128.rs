use std::io;

macro_rules! impl_write_unsigned_leb128 {
    ($fn_name:ident, $int_ty:ty) => {
        /// Write `value` as an unsigned LEB128 integer, returning the number of bytes written.
        #[inline]
        pub fn $fn_name<W>(out: &mut W, mut value: $int_ty) -> io::Result<usize>
        where
            W: io::Write + ?Sized,
        {
            let mut written = 0;
            loop {
                written += 1;
                if value < 0x80 {
                    out.write_all(&[value as u8])?;
                    return Ok(written);
                }
                out.write_all(&[((value & 0x7f) | 0x80) as u8])?;
                value >>= 7;
            }
        }
    };
}

impl_write_unsigned_leb128!(write_u32_leb128, u32);

macro_rules! impl_write_signed_leb128 {
    ($fn_name:ident, $int_ty:ty) => {
        /// Write `value` as a signed LEB128 integer, returning the number of bytes written.
        ///
        /// Encoding stops once the remaining bits are the sign extension of bit 6 of the last
        /// byte written.
        #[inline]
        pub fn $fn_name<W>(out: &mut W, mut value: $int_ty) -> io::Result<usize>
        where
            W: io::Write + ?Sized,
        {
            let mut written = 0;
            loop {
                let byte = (value & 0x7f) as u8;
                // arithmetic shift, keeps the sign
                value >>= 7;
                written += 1;
                let sign_bit = byte & 0x40 != 0;
                if (value == 0 && !sign_bit) || (value == -1 && sign_bit) {
                    out.write_all(&[byte])?;
                    return Ok(written);
                }
                out.write_all(&[byte | 0x80])?;
            }
        }
    };
}

impl_write_signed_leb128!(write_s32_leb128, i32);
