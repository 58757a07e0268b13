#![no_main]

use libfuzzer_sys::fuzz_target;
use linkage_reducer::config::ReduceConfig;
use linkage_reducer::pipeline::reduce_str;
use linkage_reducer::serializer::render_document;

fuzz_target!(|data: &[u8]| {
    // Only UTF-8 input reaches the tag stream
    if let Ok(input) = std::str::from_utf8(data) {
        // Reduction and rendering must not panic regardless of input
        if let Ok(store) = reduce_str(input) {
            let _ = render_document(&store, &ReduceConfig::default());
        }
    }
});
