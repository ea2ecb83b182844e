use crate::error::ParseError;
use crate::tags::Tags;

use std::fmt;

/// One position of a template pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    /// `measurement`: consume one name segment into the measurement.
    Measurement,
    /// `measurement*`: consume every remaining name segment and stop.
    MeasurementRest,
    /// A tag key: consume one name segment as that tag's value.
    Tag(String),
    /// An empty token: consume one name segment with no effect.
    Skip,
}

/// A compiled routing rule, like the ones used by the InfluxDB graphite
/// write plugin.
///
/// A rule is one configuration line of the shape
///
/// ```text
/// [match-pattern] template-pattern [key=value,key=value...]
/// ```
///
/// where the match pattern selects which names the rule applies to and the
/// template pattern says, position by position, what each dot-segment of a
/// matched name becomes.
#[derive(Clone, Debug)]
pub struct Template {
    pattern: String,
    tokens: Vec<Token>,
    template: String,
    tags: Tags,
    separator: String,
}

impl Template {
    /// Compiles a single template line.
    ///
    /// `default_tags` are copied into the rule before the line's own tag
    /// field is merged over them, so a rule-specific value wins on key
    /// collision. The copy means later changes to the caller's map never
    /// reach a compiled rule.
    ///
    /// ```
    /// use tagmatch::{Tags, Template};
    /// # fn main() -> Result<(), tagmatch::ParseError> {
    /// let template = Template::parse("servers.* .host.measurement*", ".", &Tags::new())?;
    /// let (measurement, tags) = template.apply("servers.web01.cpu");
    /// assert_eq!(measurement, "cpu");
    /// assert_eq!(tags.get("host"), Some("web01"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(
        line: &str,
        separator: &str,
        default_tags: &Tags,
    ) -> Result<Template, ParseError> {
        let fields = line.split_whitespace().collect::<Vec<_>>();
        if fields.is_empty() || fields.len() > 3 {
            return Err(ParseError::InvalidLine { line: line.into() });
        }

        let mut tags = default_tags.clone();
        let (pattern, template) = match fields.len() {
            1 => ("*", fields[0]),
            _ => (fields[0], fields[1]),
        };

        if let Some(field) = fields.get(2) {
            for pair in field.split(',') {
                match pair.split_once('=') {
                    Some((key, value)) if !value.contains('=') => tags.insert(key, value),
                    _ => return Err(ParseError::InvalidTag { pair: pair.into() }),
                }
            }
        }

        let tokens = template
            .split('.')
            .map(|token| match token {
                "measurement" => Token::Measurement,
                "measurement*" => Token::MeasurementRest,
                "" => Token::Skip,
                key => Token::Tag(key.into()),
            })
            .collect();

        Ok(Template {
            pattern: pattern.into(),
            tokens,
            template: template.into(),
            tags,
            separator: separator.into(),
        })
    }

    /// The match pattern this rule was registered under.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The template pattern, as written in the configuration line.
    pub fn template_pattern(&self) -> &str {
        &self.template
    }

    /// Applies the template to a metric name, extracting the measurement
    /// and tags.
    ///
    /// Template tokens and name segments are walked in lockstep; whichever
    /// runs out first ends the walk. A template with no `measurement` token
    /// falls back to the entire name as the measurement.
    pub fn apply(&self, name: &str) -> (String, Tags) {
        let segments = name.split('.').collect::<Vec<_>>();
        let mut measurement = Vec::new();
        let mut tags = self.tags.clone();

        for (i, token) in self.tokens.iter().enumerate() {
            if i >= segments.len() {
                break;
            }
            match token {
                Token::Measurement => measurement.push(segments[i]),
                Token::MeasurementRest => {
                    measurement.extend(&segments[i..]);
                    break;
                }
                Token::Tag(key) => tags.insert(key.as_str(), segments[i]),
                Token::Skip => {}
            }
        }

        if measurement.is_empty() {
            measurement = segments;
        }

        (measurement.join(self.separator.as_str()), tags)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.template)
    }
}
