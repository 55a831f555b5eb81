// UTF-16 conversions for strings crossing the engine boundary.
use crate::core::error::{Error, ErrorKind};

use super::sys::WChar;

/// Encodes `text` as a null-terminated UTF-16 buffer for the engine.
/// Interior NULs would truncate on the far side, so they are rejected.
pub fn to_wide(text: &str) -> Result<Vec<WChar>, Error> {
    if text.contains('\0') {
        return Err(Error::new(ErrorKind::Usage).with_message("string contains a null character"));
    }
    let mut wide: Vec<WChar> = text.encode_utf16().collect();
    wide.push(0);
    Ok(wide)
}

/// Reads a null-terminated UTF-16 string owned by the engine. Strict
/// decoding: unpaired surrogates are an engine defect, not caller input.
///
/// # Safety
/// `ptr` must be null or point to a null-terminated UTF-16 buffer that
/// stays valid for the duration of the call.
pub unsafe fn from_wide_ptr(ptr: *const WChar) -> Result<String, Error> {
    if ptr.is_null() {
        return Err(Error::new(ErrorKind::NullArgument).with_message("engine returned null string"));
    }
    let units = unsafe { wide_units(ptr) };
    String::from_utf16(units).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("engine returned invalid utf-16")
            .with_source(err)
    })
}

/// Lossy variant for diagnostics (error messages), where a replacement
/// character beats losing the message.
///
/// # Safety
/// Same contract as [`from_wide_ptr`].
pub unsafe fn from_wide_ptr_lossy(ptr: *const WChar) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let units = unsafe { wide_units(ptr) };
    Some(String::from_utf16_lossy(units))
}

unsafe fn wide_units<'a>(ptr: *const WChar) -> &'a [WChar] {
    let mut len = 0usize;
    unsafe {
        while *ptr.add(len) != 0 {
            len += 1;
        }
        std::slice::from_raw_parts(ptr, len)
    }
}

#[cfg(test)]
mod tests {
    use super::{from_wide_ptr, from_wide_ptr_lossy, to_wide};

    fn round_trip(text: &str) -> String {
        let wide = to_wide(text).expect("encode");
        unsafe { from_wide_ptr(wide.as_ptr()).expect("decode") }
    }

    #[test]
    fn ascii_round_trips() {
        assert_eq!(round_trip("Order Date"), "Order Date");
    }

    #[test]
    fn non_bmp_round_trips() {
        // Surrogate pairs and CJK both survive the boundary.
        assert_eq!(round_trip("数量 😀 Ünïcode"), "数量 😀 Ünïcode");
    }

    #[test]
    fn empty_string_round_trips() {
        let wide = to_wide("").expect("encode");
        assert_eq!(wide, vec![0]);
        assert_eq!(round_trip(""), "");
    }

    #[test]
    fn encoded_length_matches_utf16_units() {
        let text = "a😀b";
        let wide = to_wide(text).expect("encode");
        assert_eq!(wide.len(), text.encode_utf16().count() + 1);
        assert_eq!(*wide.last().expect("terminator"), 0);
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = to_wide("a\0b").expect_err("should fail");
        assert_eq!(err.kind(), crate::core::error::ErrorKind::Usage);
    }

    #[test]
    fn null_pointer_is_an_error() {
        let err = unsafe { from_wide_ptr(std::ptr::null()) }.expect_err("should fail");
        assert_eq!(err.kind(), crate::core::error::ErrorKind::NullArgument);
        assert!(unsafe { from_wide_ptr_lossy(std::ptr::null()) }.is_none());
    }

    #[test]
    fn unpaired_surrogate_is_strict_error_but_lossy_ok() {
        let bad: Vec<u16> = vec![0xD800, 0];
        let err = unsafe { from_wide_ptr(bad.as_ptr()) }.expect_err("should fail");
        assert_eq!(err.kind(), crate::core::error::ErrorKind::Internal);
        let lossy = unsafe { from_wide_ptr_lossy(bad.as_ptr()) }.expect("lossy");
        assert_eq!(lossy, "\u{FFFD}");
    }
}
