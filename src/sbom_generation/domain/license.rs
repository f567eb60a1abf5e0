use crate::shared::{AssemblyError, AssemblyResult, ErrorKind};
use std::fmt;

/// Prefix every custom (extracted) license identifier must carry.
pub const LICENSE_REF_PREFIX: &str = "LicenseRef-";

const NOASSERTION: &str = "NOASSERTION";
const NONE: &str = "NONE";

/// A license reference or a composition of license references.
///
/// `Listed` holds a canonical catalog identifier, `Custom` the identifier of
/// a [`CustomLicense`] registered in the assembling document (or one imported
/// through `DocumentRef-<doc>:LicenseRef-<id>`). `NoAssertion` is the explicit
/// "unknown" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LicenseExpression {
    Listed(String),
    Custom(String),
    NoAssertion,
    None,
    OrLater(String),
    WithException {
        license: Box<LicenseExpression>,
        exception: String,
    },
    And(Vec<LicenseExpression>),
    Or(Vec<LicenseExpression>),
}

impl LicenseExpression {
    /// Parses an SPDX license expression. Operators are case-insensitive and
    /// bind `WITH` > `AND` > `OR`.
    pub fn parse(text: &str) -> AssemblyResult<Self> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(invalid(text, "expression is empty"));
        }
        let mut parser = Parser {
            tokens,
            position: 0,
            source: text,
        };
        let expression = parser.parse_or()?;
        if parser.position != parser.tokens.len() {
            return Err(invalid(text, "unexpected trailing tokens"));
        }
        Ok(expression)
    }

    /// Conjunction of `members`: NoAssertion when empty, the single member
    /// when there is one. Duplicates are dropped, first occurrence wins.
    pub fn conjunction(members: Vec<LicenseExpression>) -> Self {
        let mut unique: Vec<LicenseExpression> = Vec::with_capacity(members.len());
        for member in members {
            for flattened in flatten(member, Operator::And) {
                if !unique.contains(&flattened) {
                    unique.push(flattened);
                }
            }
        }
        match unique.len() {
            0 => LicenseExpression::NoAssertion,
            1 => unique.remove(0),
            _ => LicenseExpression::And(unique),
        }
    }

    pub fn is_no_assertion(&self) -> bool {
        matches!(self, LicenseExpression::NoAssertion)
    }

    /// Every custom identifier referenced anywhere in the tree.
    pub fn custom_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_custom_ids(&mut ids);
        ids
    }

    fn collect_custom_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            LicenseExpression::Custom(id) => ids.push(id),
            LicenseExpression::WithException { license, .. } => license.collect_custom_ids(ids),
            LicenseExpression::And(members) | LicenseExpression::Or(members) => {
                for member in members {
                    member.collect_custom_ids(ids);
                }
            }
            _ => {}
        }
    }

    /// Rewrites listed identifiers through `lookup`, leaving unknown ones untouched.
    pub fn canonicalize<F>(self, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            LicenseExpression::Listed(id) => {
                LicenseExpression::Listed(lookup(&id).unwrap_or(id))
            }
            LicenseExpression::OrLater(id) => {
                LicenseExpression::OrLater(lookup(&id).unwrap_or(id))
            }
            LicenseExpression::WithException { license, exception } => {
                LicenseExpression::WithException {
                    license: Box::new(license.canonicalize(lookup)),
                    exception,
                }
            }
            LicenseExpression::And(members) => LicenseExpression::And(
                members.into_iter().map(|m| m.canonicalize(lookup)).collect(),
            ),
            LicenseExpression::Or(members) => LicenseExpression::Or(
                members.into_iter().map(|m| m.canonicalize(lookup)).collect(),
            ),
            other => other,
        }
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseExpression::Listed(id) | LicenseExpression::Custom(id) => f.write_str(id),
            LicenseExpression::NoAssertion => f.write_str(NOASSERTION),
            LicenseExpression::None => f.write_str(NONE),
            LicenseExpression::OrLater(id) => write!(f, "{}+", id),
            LicenseExpression::WithException { license, exception } => {
                write!(f, "{} WITH {}", license, exception)
            }
            LicenseExpression::And(members) => write_composite(f, members, "AND"),
            LicenseExpression::Or(members) => write_composite(f, members, "OR"),
        }
    }
}

fn write_composite(
    f: &mut fmt::Formatter<'_>,
    members: &[LicenseExpression],
    operator: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", operator)?;
        }
        write!(f, "{}", member)?;
    }
    f.write_str(")")
}

/// A license supplied by the user with its verbatim text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomLicense {
    pub id: String,
    pub extracted_text: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub cross_refs: Vec<String>,
}

impl CustomLicense {
    pub fn new(id: impl Into<String>, extracted_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extracted_text: extracted_text.into(),
            name: None,
            comment: None,
            cross_refs: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_cross_refs(mut self, cross_refs: Vec<String>) -> Self {
        self.cross_refs = cross_refs;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    And,
    Or,
    With,
    Id(String),
}

#[derive(Clone, Copy)]
enum Operator {
    And,
    Or,
}

fn tokenize(text: &str) -> AssemblyResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            tokens.push(Token::Open);
            chars.next();
        } else if c == ')' {
            tokens.push(Token::Close);
            chars.next();
        } else {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() || c == '(' || c == ')' {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            let word = &text[start..end];
            let token = match word.to_ascii_uppercase().as_str() {
                "AND" => Token::And,
                "OR" => Token::Or,
                "WITH" => Token::With,
                _ => Token::Id(word.to_string()),
            };
            tokens.push(token);
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    fn parse_or(&mut self) -> AssemblyResult<LicenseExpression> {
        let mut members = flatten(self.parse_and()?, Operator::Or);
        while self.peek() == Some(&Token::Or) {
            self.position += 1;
            members.extend(flatten(self.parse_and()?, Operator::Or));
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            LicenseExpression::Or(members)
        })
    }

    fn parse_and(&mut self) -> AssemblyResult<LicenseExpression> {
        let mut members = flatten(self.parse_with()?, Operator::And);
        while self.peek() == Some(&Token::And) {
            self.position += 1;
            members.extend(flatten(self.parse_with()?, Operator::And));
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            LicenseExpression::And(members)
        })
    }

    fn parse_with(&mut self) -> AssemblyResult<LicenseExpression> {
        let license = self.parse_primary()?;
        if self.peek() != Some(&Token::With) {
            return Ok(license);
        }
        self.position += 1;
        if matches!(
            license,
            LicenseExpression::And(_)
                | LicenseExpression::Or(_)
                | LicenseExpression::WithException { .. }
        ) {
            return Err(invalid(
                self.source,
                "WITH must follow a single license identifier",
            ));
        }
        match self.next() {
            Some(Token::Id(exception)) if is_valid_id(&exception) => {
                Ok(LicenseExpression::WithException {
                    license: Box::new(license),
                    exception,
                })
            }
            _ => Err(invalid(self.source, "WITH must be followed by an exception identifier")),
        }
    }

    fn parse_primary(&mut self) -> AssemblyResult<LicenseExpression> {
        match self.next() {
            Some(Token::Open) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(invalid(self.source, "missing closing parenthesis")),
                }
            }
            Some(Token::Id(id)) => simple_expression(&id, self.source),
            Some(Token::Close) => Err(invalid(self.source, "unexpected ')'")),
            Some(_) => Err(invalid(self.source, "operator without a left operand")),
            None => Err(invalid(self.source, "expression ends with an operator")),
        }
    }
}

fn flatten(expression: LicenseExpression, operator: Operator) -> Vec<LicenseExpression> {
    match (operator, expression) {
        (Operator::And, LicenseExpression::And(members))
        | (Operator::Or, LicenseExpression::Or(members)) => members,
        (_, other) => vec![other],
    }
}

fn simple_expression(id: &str, source: &str) -> AssemblyResult<LicenseExpression> {
    if id.eq_ignore_ascii_case(NOASSERTION) {
        return Ok(LicenseExpression::NoAssertion);
    }
    if id.eq_ignore_ascii_case(NONE) {
        return Ok(LicenseExpression::None);
    }
    if is_custom_id(id) {
        return Ok(LicenseExpression::Custom(id.to_string()));
    }
    if let Some(base) = id.strip_suffix('+') {
        if is_valid_id(base) {
            return Ok(LicenseExpression::OrLater(base.to_string()));
        }
    } else if is_valid_id(id) {
        return Ok(LicenseExpression::Listed(id.to_string()));
    }
    Err(invalid(source, &format!("'{}' is not a valid license identifier", id)))
}

/// `LicenseRef-x` or `DocumentRef-y:LicenseRef-x`.
pub fn is_custom_id(id: &str) -> bool {
    let local = match id.split_once(':') {
        Some((document, local)) => {
            if !starts_with_ignore_case(document, "DocumentRef-") || !is_valid_id(document) {
                return false;
            }
            local
        }
        None => id,
    };
    starts_with_ignore_case(local, LICENSE_REF_PREFIX)
        && local.len() > LICENSE_REF_PREFIX.len()
        && is_valid_id(local)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

fn invalid(source: &str, reason: &str) -> AssemblyError {
    AssemblyError::new(
        ErrorKind::InvalidLicenseExpression,
        format!("'{}': {}", source.trim(), reason),
    )
}
