#![no_main]
use libfuzzer_sys::fuzz_target;
use libutf8vld::{Utf8Validator, validate_whole, validate_complete};

fuzz_target!(|data: &[u8]| {
    let Some((&split, data)) = data.split_first() else { return };

    let mut whole = Utf8Validator::new();
    whole.feed(data);

    // First byte picks a chunk size, so the same input is also fed piecewise
    let step = split as usize + 1;
    let mut chunked = Utf8Validator::new();
    for chunk in data.chunks(step) {
        chunked.feed(chunk);
    }

    assert_eq!(whole.state(), chunked.state());
    assert_eq!(whole.is_valid(), chunked.is_valid());
    assert_eq!(whole.ends_on_codepoint(), chunked.ends_on_codepoint());
    assert_eq!(whole.total_index(), chunked.total_index());
    assert_eq!(validate_whole(data), whole.is_valid());
    assert_eq!(validate_complete(data), std::str::from_utf8(data).is_ok());
});
