//! iso3166-updates-cli
//! ===================
//!
//! Command-line interface for the `iso3166-updates-core` query engine.
//!
//! This crate primarily provides a binary (`iso3166-updates`). We include a
//! small library target so that docs.rs renders a documentation page and
//! shows this overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install iso3166-updates-cli
//! iso3166-updates --help
//! iso3166-updates stats
//! iso3166-updates query --alpha FR,DE --year 2016-2020
//! iso3166-updates query --months 12 --sort-by dateDesc
//! iso3166-updates match-name "South Korea, Türkiye"
//! iso3166-updates search "Eswatini"
//! ```
//!
//! For programmatic access use the [`iso3166-updates-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
