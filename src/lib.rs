//! assetkit - asset preparation tools
//!
//! Two offline batch tools used to prepare application assets:
//!
//! - `tzdata`: downloads the latest IANA tz database, builds it, and packages
//!   the trailing POSIX TZ rule of every zone into `tzdata.json`
//! - `gettext`: scans a source tree for `gettext`/`ngettext` calls and
//!   renders a PO template for translators
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `gettext`: Translatable string extraction and PO rendering
//! - `tzdata`: tz database snapshot builder

pub mod cli;
pub mod config;
pub mod gettext;
pub mod tzdata;
