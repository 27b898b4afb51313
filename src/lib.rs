//! relpack builds versioned release artifacts: a full bundle of the current
//! revision, an incremental patch of the files that changed since the last
//! revision, and a release manifest, packaged into one distributable zip.

pub mod commands;
pub mod core;
pub mod fsutil;
pub mod ui;
