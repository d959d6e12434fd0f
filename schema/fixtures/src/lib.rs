//! Shared model-archive fixtures.
//!
//! Two archives live under `archives/`: `late-delivery-and-penalty` (the
//! canonical clause with a Request/Response pair and complex time types)
//! and `copyright-license` (a two-document archive exercising imports,
//! participants, concepts, and enums).

use std::path::PathBuf;

/// Root directory holding the fixture archives.
#[must_use]
pub fn archives_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("archives")
}

/// The late-delivery-and-penalty document, for tests that register text
/// directly instead of walking the filesystem.
pub const LATE_DELIVERY_AND_PENALTY: &str =
    include_str!("../archives/late-delivery-and-penalty/model/penalty.cto");

pub const COPYRIGHT_LICENSE: &str =
    include_str!("../archives/copyright-license/model/license.cto");

pub const COPYRIGHT_LICENSE_PARTIES: &str =
    include_str!("../archives/copyright-license/model/parties.cto");
