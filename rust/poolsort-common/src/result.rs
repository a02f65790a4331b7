pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

/// Verifies that `[index, index + length)` lies within a sequence of `len` elements.
///
/// The end of the range is computed with overflow checking, so a range whose end
/// does not fit in `usize` is reported the same way as one that runs past `len`.
#[inline]
pub fn verify_range(name: &str, index: usize, length: usize, len: usize) -> Result<()> {
    match index.checked_add(length) {
        Some(end) if end <= len => Ok(()),
        Some(end) => index_out_of_range(name, end, len),
        None => index_out_of_range(name, usize::MAX, len),
    }
}

/// Verifies that `index` addresses an element of a sequence of `len` elements.
#[inline]
pub fn verify_index(name: &str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        index_out_of_range(name, index, len)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn index_out_of_range(name: &str, index: usize, len: usize) -> Result<()> {
    Err(crate::error::ErrorKind::IndexOutOfRange {
        name: name.to_string(),
        index,
        len,
    }
    .into())
}
