//! Fuzz target for Sedeen XML parsing.
//!
//! Feeds arbitrary bytes through the whole pipeline, hole resolution
//! included, checking for panics or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slidelabel::sedeen::{from_sedeen_xml_slice, ParseOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    let _ = from_sedeen_xml_slice(data, &ParseOptions::default());
});
