#![no_main]

use jstream_wire::{scan_value, ByteSource};
use libfuzzer_sys::fuzz_target;

// Fuzz target: value extent scanner in isolation.
//
// The scanner must never panic, must never consume past the value it
// returns, and must copy exactly the bytes it consumed.
fuzz_target!(|data: &[u8]| {
    let mut src = ByteSource::new(data);
    let mut out = Vec::new();
    if scan_value(&mut src, &mut out, Some(1 << 16)).is_ok() {
        let consumed = usize::try_from(src.offset()).unwrap();
        assert_eq!(&data[..consumed], out.as_slice());
    }
});
