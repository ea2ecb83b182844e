//! A router from flat, dot-delimited metric names to structured
//! `(measurement, tags)` pairs.
//!
//! Metrics arriving over the legacy statsd/collectd wire carry a single
//! opaque name like `servers.web01.cpu.load`. Time-series backends in the
//! InfluxDB family instead want one measurement name plus a set of key/value
//! tags. The mapping between the two is configured with *graphite templates*,
//! the rule language used by the InfluxDB graphite write plugin: each rule
//! pairs an optional match pattern with a positional template that names
//! which dot-segments become the measurement and which become tags.
//!
//! ```rust
//! use tagmatch::Router;
//! # fn main() -> Result<(), tagmatch::ParseError> {
//! let router = Router::new(
//!     "servers.* .host.measurement*
//!      prod.*.cpu env.host.measurement region=us-west",
//! )?;
//!
//! let (measurement, tags) = router.route("servers.web01.cpu.load");
//! assert_eq!(measurement, "cpu.load");
//! assert_eq!(tags.get("host"), Some("web01"));
//!
//! let (measurement, tags) = router.route("prod.web02.cpu");
//! assert_eq!(measurement, "cpu");
//! assert_eq!(tags.get("env"), Some("prod"));
//! assert_eq!(tags.get("region"), Some("us-west"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Matching
//!
//! Rules are compiled into a tree sorted over dot-segments. Lookup walks the
//! name one segment at a time, preferring an exact child over the wildcard
//! (`*`) child at every level, and falling back to a rule that terminated at
//! an earlier depth when no child continues the walk. A catch-all
//! `* measurement*` rule is always installed last, so [`Router::route`] is
//! total: every name resolves to some `(measurement, tags)` pair.
//!
//! When two rules are registered for the identical match pattern, the first
//! one wins and the duplicate is silently dropped.
//!
//! ## Sharing and reloading
//!
//! A built [`Router`] is never mutated, so it is `Send + Sync` and can be
//! shared freely (typically behind an `Arc`) by any number of concurrent
//! lookups. To pick up new configuration, build a fresh `Router` and swap
//! the shared handle; live trees are never edited in place.
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod router;
mod tags;
mod template;
mod tree;

pub use error::ParseError;
pub use router::{Router, RouterBuilder};
pub use tags::{Tags, TagsIntoIter, TagsIter};
pub use template::Template;
