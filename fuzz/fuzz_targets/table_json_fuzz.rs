//! Fuzz test for table resource decoding
//!
//! Feeds arbitrary bytes through JSON parsing and the definition codec to find:
//! - Panics on malformed or partially-populated resources
//! - Definitions that do not survive a second encode/decode pass
//!
//! Run with: cargo +nightly fuzz run table_json_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabledef_wire::{Table, TableDefinitionCodec};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = Table::from_json(input) else {
        return;
    };

    let codec = TableDefinitionCodec::default();
    match codec.decode(&table) {
        Ok(definition) => {
            // Whatever decoded once must decode again to the same value
            let reencoded = codec.encode(&definition);
            let again = codec.decode(&reencoded).expect("re-encoded definition decodes");
            assert_eq!(definition, again);
        }
        Err(err) => {
            assert!(!err.to_string().is_empty(), "error message should not be empty");
        }
    }
});
