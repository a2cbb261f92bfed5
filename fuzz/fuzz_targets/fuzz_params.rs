#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;
use krnr::domain::value_objects::{apply_params, find_params, parse_param_flag};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let names = find_params(text);
        let values: BTreeMap<String, String> =
            names.into_iter().map(|n| (n, String::from("x"))).collect();
        let _ = apply_params(text, &values);
        let _ = parse_param_flag(text);
    }
});
