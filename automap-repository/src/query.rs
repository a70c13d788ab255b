use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use automap::Shape;
use indexmap::IndexMap;

use crate::{Error, ErrorKind, Value};

/// How a query is written in a URL, shown to callers who got it wrong.
pub const QUERY_FORMAT_HINT: &str = "query must be q=(key),(operator),(value)";

/// Comparison applied by a [`Query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Greater than.
    Gt,
    /// Less than or equal.
    Le,
    /// Greater than or equal.
    Ge,
}

impl Operator {
    /// Every operator, in the order they are listed to users.
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Gt,
        Operator::Le,
        Operator::Ge,
    ];

    /// The spelling used in queries: `EQ`, `NE`, and so on.
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Lt => "LT",
            Operator::Gt => "GT",
            Operator::Le => "LE",
            Operator::Ge => "GE",
        }
    }

    fn lookup(s: &str) -> Option<Self> {
        Operator::ALL.into_iter().find(|op| op.as_str() == s)
    }

    /// Applies the operator to the result of comparing a stored value with the
    /// queried one.
    ///
    /// Incomparable values (`None`) only satisfy [`Operator::Ne`].
    pub fn matches(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Operator::Ne, None) => true,
            (_, None) => false,
            (Operator::Eq, Some(ord)) => ord.is_eq(),
            (Operator::Ne, Some(ord)) => ord.is_ne(),
            (Operator::Lt, Some(ord)) => ord.is_lt(),
            (Operator::Gt, Some(ord)) => ord.is_gt(),
            (Operator::Le, Some(ord)) => ord.is_le(),
            (Operator::Ge, Some(ord)) => ord.is_ge(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    /// Parses an operator spelled exactly as [`Operator::as_str`] does: `GT`, not `gt`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::lookup(s).ok_or_else(|| {
            Error::new(ErrorKind::BadRequest).wrap(format!(
                "operator({s}): invalid - valid operators are: ({})",
                operator_list()
            ))
        })
    }
}

fn operator_list() -> String {
    Operator::ALL
        .iter()
        .map(|op| op.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A query as it arrived, before anything is known about the entity it targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawQuery {
    /// The tag to filter on.
    pub key: String,
    /// The operator, as written.
    pub operator: String,
    /// The value, as written.
    pub value: String,
}

impl RawQuery {
    /// Checks the query against the tags an entity exposes and the declared
    /// type of each, as given by [`automap::tag_to_type`].
    ///
    /// Every problem is reported at once, in a single [`ErrorKind::BadRequest`].
    pub fn validate(&self, keys: &IndexMap<&'static str, &'static Shape>) -> Result<Query, Error> {
        let mut problems = String::new();

        let value = match keys.get(self.key.as_str()) {
            Some(&shape) => match Value::parse_as(shape, &self.value) {
                Ok(value) => Some(value),
                Err(err) => {
                    problems.push_str(&format!("{err} "));
                    None
                }
            },
            None => {
                let valid = keys.keys().copied().collect::<Vec<_>>().join(" ");
                problems.push_str(&format!(
                    "key({}): invalid - valid keys are: ({valid}) ",
                    self.key
                ));
                None
            }
        };

        let operator = Operator::lookup(&self.operator);
        if operator.is_none() {
            problems.push_str(&format!(
                "operator({}): invalid - valid operators are: ({}) ",
                self.operator,
                operator_list()
            ));
        }

        match (value, operator) {
            (Some(value), Some(operator)) => Ok(Query::new(self.key.clone(), operator, value)),
            _ => Err(Error::new(ErrorKind::BadRequest)
                .wrap(format!("invalid query: {}", problems.trim_end()))),
        }
    }
}

/// A validated filter: `key operator value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// The tag to filter on.
    pub key: String,
    /// The comparison to apply.
    pub operator: Operator,
    /// What stored values are compared with.
    pub value: Value,
}

impl Query {
    /// Builds a query directly, bypassing validation.
    pub fn new(key: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
        }
    }

    /// Returns true if `stored` satisfies the query.
    ///
    /// `stored` is the left-hand side: `Lt` matches stored values below the
    /// queried one.
    pub fn matches(&self, stored: &Value) -> bool {
        self.operator.matches(stored.partial_cmp(&self.value))
    }
}

/// Extracts the `q` parameters of a URL query string.
///
/// A leading `?` is ignored. Each parameter must be `q=key,operator,value`; any
/// other parameter, or a value with the wrong number of parts, is a
/// [`ErrorKind::BadRequest`].
pub fn parse_url_query(query: &str) -> Result<Vec<RawQuery>, Error> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut parsed = Vec::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        let malformed = || Error::new(ErrorKind::BadRequest).wrap(QUERY_FORMAT_HINT);
        if name != "q" {
            return Err(malformed());
        }

        let mut parts = value.split(',');
        let (Some(key), Some(operator), Some(value), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        parsed.push(RawQuery {
            key: key.to_owned(),
            operator: operator.to_owned(),
            value: value.to_owned(),
        });
    }
    Ok(parsed)
}

/// Parses a URL query string and validates every query in it.
///
/// Stops at the first invalid query.
pub fn parse_queries(
    query: &str,
    keys: &IndexMap<&'static str, &'static Shape>,
) -> Result<Vec<Query>, Error> {
    parse_url_query(query)?
        .iter()
        .map(|raw| raw.validate(keys))
        .collect()
}
