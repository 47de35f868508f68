#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full record stream decoder.
//
// Feeds arbitrary bytes through `decode` and checks that every record the
// handler sees occurs verbatim in the input at the offset it reports.
// Catches bugs in:
// - Shape classification and re-classification after each structure
// - Array comma / bracket handling
// - Value extent scanning (strings, escapes, nesting)
// - Offset bookkeeping
fuzz_target!(|data: &[u8]| {
    let _ = jstream_decoder::decode(data, |record| {
        let start = usize::try_from(record.offset()).unwrap();
        assert_eq!(&data[start..start + record.len()], record.as_bytes());
        Ok::<_, std::io::Error>(())
    });
});
