#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte stream on stdin, including stray SUB and `^` bytes
    let _ = krnr::domain::services::record_commands(data);
});
