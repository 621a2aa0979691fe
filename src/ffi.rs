/// C ABI bridge for native callers.
/// Handles are opaque boxed validators; results are read back through accessors.

use crate::core::{Utf8Validator, validate_whole};
use std::ffi::c_int;

/// Borrow `len` bytes at `data`. A null pointer is only accepted with zero length.
unsafe fn bytes<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
    match (data.is_null(), len) {
        (_, 0) => Some(&[][..]),
        (true, _) => None,
        (false, _) => Some(std::slice::from_raw_parts(data, len)),
    }
}

#[no_mangle]
pub extern "C" fn utf8vld_new() -> *mut Utf8Validator {
    Box::into_raw(Box::new(Utf8Validator::new()))
}

#[no_mangle]
pub extern "C" fn utf8vld_free(validator: *mut Utf8Validator) {
    if !validator.is_null() {
        unsafe { drop(Box::from_raw(validator)); }
    }
}

#[no_mangle]
pub extern "C" fn utf8vld_reset(validator: *mut Utf8Validator) {
    if let Some(v) = unsafe { validator.as_mut() } {
        v.reset();
    }
}

/// Feed `length` bytes starting at `data + offset`.
/// A null `data` with nonzero `length` leaves the validator untouched.
#[no_mangle]
pub extern "C" fn utf8vld_validate(
    validator: *mut Utf8Validator,
    data: *const u8,
    offset: usize,
    length: usize,
) {
    let Some(v) = (unsafe { validator.as_mut() }) else { return };
    let start = if data.is_null() { data } else { unsafe { data.add(offset) } };
    match unsafe { bytes(start, length) } {
        Some(chunk) => v.feed(chunk),
        None => log::warn!("utf8vld_validate: null data with length {}", length),
    }
}

/// 1 if no malformed sequence has been seen. A null handle reads as invalid.
#[no_mangle]
pub extern "C" fn utf8vld_is_valid(validator: *const Utf8Validator) -> c_int {
    unsafe { validator.as_ref() }.map_or(0, |v| v.is_valid() as c_int)
}

#[no_mangle]
pub extern "C" fn utf8vld_ends_on_codepoint(validator: *const Utf8Validator) -> c_int {
    unsafe { validator.as_ref() }.map_or(0, |v| v.ends_on_codepoint() as c_int)
}

/// Raw automaton state: 0 accept, 1 reject, anything else mid-sequence. -1 for a null handle.
#[no_mangle]
pub extern "C" fn utf8vld_state(validator: *const Utf8Validator) -> c_int {
    unsafe { validator.as_ref() }.map_or(-1, |v| v.state() as c_int)
}

#[no_mangle]
pub extern "C" fn utf8vld_current_index(validator: *const Utf8Validator) -> usize {
    unsafe { validator.as_ref() }.map_or(0, |v| v.current_index())
}

#[no_mangle]
pub extern "C" fn utf8vld_total_index(validator: *const Utf8Validator) -> usize {
    unsafe { validator.as_ref() }.map_or(0, |v| v.total_index())
}

/// One-shot validation of a buffer. Returns 1 if no malformed sequence was
/// found; a trailing incomplete sequence still counts as valid.
/// A null `data` with nonzero `len` returns 0.
#[no_mangle]
pub extern "C" fn utf8_valid(data: *const u8, len: usize) -> c_int {
    unsafe { bytes(data, len) }.map_or(0, |d| validate_whole(d) as c_int)
}
