use num_traits::PrimInt;

/// A primitive integer that the counting and radix sorts can order by value.
///
/// Every supported type widens losslessly into `i128`.
pub trait SortKey: PrimInt + Default + Send + Sync + 'static {
    fn to_key(self) -> i128;

    /// Narrows `key` back into `Self`. Only called with keys produced from values of
    /// `Self`, or lying between two such keys.
    fn from_key(key: i128) -> Self;
}

macro_rules! impl_sort_key {
    ($($ty:ty),*) => {
        $(
            impl SortKey for $ty {
                #[inline]
                fn to_key(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_key(key: i128) -> Self {
                    key as $ty
                }
            }
        )*
    };
}

impl_sort_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
