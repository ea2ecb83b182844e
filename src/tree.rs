use crate::template::Template;

use std::cmp::Ordering;

/// One dot-component of a match pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Wildcard,
}

impl Segment {
    fn parse(segment: &str) -> Segment {
        match segment {
            "*" => Segment::Wildcard,
            _ => Segment::Literal(segment.into()),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            Segment::Literal(segment) => segment,
            Segment::Wildcard => "*",
        }
    }

    // Compares against a raw segment without allocating, consistent
    // with the `Ord` impl below.
    fn cmp_str(&self, other: &str) -> Ordering {
        match (self, other) {
            (Segment::Wildcard, "*") => Ordering::Equal,
            (Segment::Wildcard, _) => Ordering::Greater,
            (Segment::Literal(_), "*") => Ordering::Less,
            (Segment::Literal(segment), _) => segment.as_str().cmp(other),
        }
    }
}

// The child ordering: literals sort lexicographically, the wildcard
// sorts after every literal. Lookup relies on the wildcard child being
// last, and uniqueness within a sorted child list caps a node at one
// wildcard child.
impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_str(other.as_str())
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A node in the sorted filter tree, covering one segment of the
/// match patterns registered beneath it.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    segment: Segment,
    template: Option<Template>,
    children: Vec<Node>,
}

fn split_first(value: &str) -> (&str, Option<&str>) {
    match value.split_once('.') {
        Some((first, rest)) => (first, Some(rest)),
        None => (value, None),
    }
}

impl Node {
    /// Creates the root node, matching the empty prefix.
    pub(crate) fn root() -> Node {
        Node {
            segment: Segment::Literal(String::new()),
            template: None,
            children: Vec::new(),
        }
    }

    /// Registers a template under the given match pattern, creating any
    /// missing path nodes along the way.
    ///
    /// The first template registered for an exact pattern wins; inserting
    /// the same pattern again leaves the existing template in place.
    pub(crate) fn insert(&mut self, pattern: &str, template: Template) {
        let (first, rest) = split_first(pattern);

        let index = match self
            .children
            .binary_search_by(|child| child.segment.cmp_str(first))
        {
            Ok(index) => index,
            Err(index) => {
                self.children.insert(
                    index,
                    Node {
                        segment: Segment::parse(first),
                        template: None,
                        children: Vec::new(),
                    },
                );
                index
            }
        };

        let child = &mut self.children[index];
        match rest {
            Some(rest) => child.insert(rest, template),
            None => {
                if child.template.is_none() {
                    child.template = Some(template);
                }
            }
        }
    }

    /// Finds the template for a metric name.
    ///
    /// At every level an exact child is preferred over the wildcard child,
    /// and a node's own template catches names that run past the end of a
    /// shorter registered pattern.
    pub(crate) fn find(&self, name: &str) -> Option<&Template> {
        let (first, rest) = split_first(name);

        if let Ok(index) = self
            .children
            .binary_search_by(|child| child.segment.cmp_str(first))
        {
            let child = &self.children[index];
            return match rest {
                Some(rest) => child.find(rest),
                None => child.template.as_ref(),
            };
        }

        match self.children.last() {
            Some(child) if child.segment == Segment::Wildcard => match rest {
                Some(rest) => child.find(rest),
                None => child.template.as_ref(),
            },
            _ => self.template.as_ref(),
        }
    }

    /// Verifies the tree invariants below this node: non-empty segments,
    /// children sorted and pairwise distinct with the wildcard last, and no
    /// node that carries neither a template nor children.
    pub(crate) fn check(&self) -> Result<(), String> {
        for pair in self.children.windows(2) {
            if pair[0].segment.cmp(&pair[1].segment) != Ordering::Less {
                return Err(format!(
                    "children of '{}' out of order: '{}' before '{}'",
                    self.segment.as_str(),
                    pair[0].segment.as_str(),
                    pair[1].segment.as_str(),
                ));
            }
        }

        for child in &self.children {
            if child.segment.as_str().is_empty() {
                return Err(format!(
                    "empty segment under '{}'",
                    self.segment.as_str()
                ));
            }
            if child.template.is_none() && child.children.is_empty() {
                return Err(format!(
                    "node '{}' has neither a template nor children",
                    child.segment.as_str()
                ));
            }
            child.check()?;
        }

        Ok(())
    }

    /// Renders the subtree as indented lines, one node per line, leaf
    /// templates appended. Used by tests to pin the tree shape.
    pub(crate) fn render(&self, depth: usize, out: &mut String) {
        for child in &self.children {
            out.push_str(&"  ".repeat(depth));
            out.push_str(child.segment.as_str());
            if let Some(template) = &child.template {
                out.push(' ');
                out.push_str(template.template_pattern());
            }
            out.push('\n');
            child.render(depth + 1, out);
        }
    }
}
