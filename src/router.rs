use crate::error::ParseError;
use crate::tags::Tags;
use crate::template::Template;
use crate::tree::Node;

use tracing::{debug, warn};

/// Routes flat metric names to `(measurement, tags)` pairs.
///
/// A router is built once from an ordered list of template lines and is
/// read-only afterwards, so a single instance can be shared across any
/// number of concurrent lookups. Configuration reload means building a new
/// router and swapping the shared handle, never editing a live one.
///
/// A catch-all `* measurement*` rule is always installed after the
/// configured rules, so [`route`](Router::route) resolves every name. When
/// two lines are registered for the identical match pattern, the first one
/// wins and the duplicate is silently dropped.
///
/// ```rust
/// use tagmatch::Router;
/// # fn main() -> Result<(), tagmatch::ParseError> {
/// let router = Router::new("servers.* .host.measurement*")?;
///
/// let (measurement, tags) = router.route("servers.web01.cpu.load");
/// assert_eq!(measurement, "cpu.load");
/// assert_eq!(tags.get("host"), Some("web01"));
///
/// // Unmatched names fall through to the catch-all.
/// let (measurement, tags) = router.route("uptime");
/// assert_eq!(measurement, "uptime");
/// assert!(tags.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Router {
    root: Node,
}

impl Router {
    /// Builds a router from newline-separated template lines, with the
    /// default separator (`.`) and no default tags.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn new(config: &str) -> Result<Router, ParseError> {
        Router::builder().build(config)
    }

    /// Returns a builder for a router with a custom separator or default
    /// tags.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Resolves a metric name to its measurement and tags.
    ///
    /// Lookup is read-only and never fails: if no rule matches (possible
    /// only for names that dead-end inside a partially covered branch), a
    /// warning is logged and the name is returned unmodified with empty
    /// tags. A routing problem must degrade one metric, not take down the
    /// ingestion path.
    pub fn route(&self, name: &str) -> (String, Tags) {
        match self.root.find(name) {
            Some(template) => template.apply(name),
            None => {
                warn!(%name, "no template matched, returning name unmodified");
                (name.to_owned(), Tags::new())
            }
        }
    }

    #[doc(hidden)]
    pub fn check_tree(&self) -> Result<(), String> {
        self.root.check()
    }

    #[doc(hidden)]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.root.render(0, &mut out);
        out
    }
}

/// A builder for a [`Router`] with a non-default separator or a set of
/// default tags.
///
/// ```rust
/// use tagmatch::Router;
/// # fn main() -> Result<(), tagmatch::ParseError> {
/// let router = Router::builder()
///     .separator("_")
///     .default_tag("dc", "us-east-1")
///     .build("servers.* .host.measurement*")?;
///
/// let (measurement, tags) = router.route("servers.web01.cpu.load");
/// assert_eq!(measurement, "cpu_load");
/// assert_eq!(tags.get("dc"), Some("us-east-1"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RouterBuilder {
    separator: String,
    default_tags: Tags,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self {
            separator: ".".into(),
            default_tags: Tags::new(),
        }
    }
}

impl RouterBuilder {
    /// Sets the separator used when a measurement is assembled from more
    /// than one name segment. Defaults to `.`.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Adds a default tag, applied to every rule unless the rule sets the
    /// same key itself.
    ///
    /// The tags are copied into each compiled rule, so the builder can be
    /// dropped or reused without affecting a built router.
    pub fn default_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_tags.insert(key, value);
        self
    }

    /// Adds default tags from an iterator of key/value pairs.
    pub fn default_tags<K, V>(mut self, tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.default_tags.extend(tags);
        self
    }

    /// Compiles the template lines and builds the router.
    ///
    /// Lines are registered in order; the catch-all `* measurement*` rule
    /// is appended last. Fails on the first line that violates the template
    /// grammar, in which case the caller keeps its previous router (or
    /// aborts startup).
    pub fn build(self, config: &str) -> Result<Router, ParseError> {
        let mut root = Node::root();

        for line in config.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let template = Template::parse(line, &self.separator, &self.default_tags)?;
            debug!(template = %template, "compiled template line");

            let pattern = template.pattern().to_owned();
            root.insert(&pattern, template);
        }

        let catch_all = Template::parse("* measurement*", &self.separator, &self.default_tags)?;
        root.insert("*", catch_all);

        Ok(Router { root })
    }
}
