#![no_main]

use jvmscope::signatures::{decode_method_descriptor, decode_signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(expr) = decode_signature(text) {
            assert_eq!(decode_signature(&expr.to_signature()).ok(), Some(expr));
        }
        let _ = decode_method_descriptor(text);
    }
});
