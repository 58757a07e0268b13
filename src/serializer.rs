//! Canonical rendering of a reduced filter document
//!
//! ```text
//! <LinkageCheckerFilter>
//!   <!--[module-a, module-b]-->
//!   <LinkageError>
//!     ...
//!   </LinkageError>
//! </LinkageCheckerFilter>
//! ```
//!
//! Markers and reasons are written as-is inside comments and text; a `-->`
//! in either produces a broken document.

use std::io::{self, Write};

use crate::config::ReduceConfig;
use crate::store::ReductionStore;

/// Root tag of the reduced document
pub const ROOT_TAG: &str = "LinkageCheckerFilter";

/// Render the reduced document to a string
pub fn render_document(store: &ReductionStore, config: &ReduceConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("<{}>\n", ROOT_TAG));
    for (record, markers) in store.entries() {
        output.push_str(&format!("  <!--{}-->\n", markers.render(config.marker_order)));
        output.push_str(&record.to_string());
    }
    output.push_str(&format!("</{}>", ROOT_TAG));

    output
}

/// Write the reduced document to `out`
pub fn write_document<W: Write>(
    store: &ReductionStore,
    config: &ReduceConfig,
    out: &mut W,
) -> io::Result<()> {
    out.write_all(render_document(store, config).as_bytes())?;
    out.flush()
}
