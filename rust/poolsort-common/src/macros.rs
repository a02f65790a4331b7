/// Verifies that `[$index, $index + $length)` fits within `$len` elements, returning
/// an `IndexOutOfRange` error from the enclosing function otherwise.
///
/// The enclosing function must return a `Result` whose error type is convertible
/// from [`crate::error::Error`].
#[macro_export]
macro_rules! verify_range {
    ($index:expr, $length:expr, $len:expr) => {{
        $crate::result::verify_range(stringify!($index), $index, $length, $len)?;
    }};
}

/// Verifies that `$index` addresses one of `$len` elements, returning an
/// `IndexOutOfRange` error from the enclosing function otherwise.
#[macro_export]
macro_rules! verify_index {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_index(stringify!($index), $index, $len)?;
    }};
}
