use std::io;

mod private_write {
    use std::io;

    pub trait Sealed {}
    impl<W> Sealed for W where W: io::Write + ?Sized {}
}

/// Extension methods for writing WebAssembly binary encodings to any [`io::Write`].
pub trait WasmWriteExt: private_write::Sealed {
    fn write_u32_leb128(&mut self, value: u32) -> io::Result<usize>;
    fn write_s32_leb128(&mut self, value: i32) -> io::Result<usize>;
    fn write_f32_le(&mut self, value: f32) -> io::Result<usize>;
    fn write_name(&mut self, name: &str) -> io::Result<usize>;
    fn write_byte_vector(&mut self, bytes: &[u8]) -> io::Result<usize>;
    fn write_section(&mut self, id: u8, payload: &[u8]) -> io::Result<usize>;
    fn write_vector<T>(&mut self, items: &[T]) -> io::Result<usize>
    where
        T: AsRef<[u8]>;
}

macro_rules! impl_write_ext {
    ($name:ident($($arg:ident: $arg_ty:ty),*)) => {
        #[inline]
        fn $name(&mut self, $($arg: $arg_ty),*) -> io::Result<usize> {
            $crate::$name(self, $($arg),*)
        }
    };
}

impl<W> WasmWriteExt for W
where
    W: io::Write + ?Sized,
{
    impl_write_ext!(write_u32_leb128(value: u32));
    impl_write_ext!(write_s32_leb128(value: i32));
    impl_write_ext!(write_f32_le(value: f32));
    impl_write_ext!(write_name(name: &str));
    impl_write_ext!(write_byte_vector(bytes: &[u8]));
    impl_write_ext!(write_section(id: u8, payload: &[u8]));

    #[inline]
    fn write_vector<T>(&mut self, items: &[T]) -> io::Result<usize>
    where
        T: AsRef<[u8]>,
    {
        crate::write_vector(self, items)
    }
}
