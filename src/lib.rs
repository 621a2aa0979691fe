pub mod core;
pub mod stream;
pub mod report;
pub mod config;
pub mod cli;
pub mod ffi;
pub mod bench;

pub use crate::core::{Utf8Validator, Status, validate_whole, validate_complete};

#[no_mangle]
pub extern "C" fn libutf8vld_version() -> *const std::ffi::c_char {
    c"0.1.0".as_ptr()
}
