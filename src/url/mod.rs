//! URL handling module for Site-Ledger
//!
//! This module provides URL normalization, link resolution and the origin
//! check that decides whether a link stays inside the crawled site.

mod normalize;
mod origin;

pub use normalize::{normalize_url, parse_seed, resolve_link};
pub use origin::Origin;
