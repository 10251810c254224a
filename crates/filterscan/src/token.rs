use core::fmt;

/// Relational and presence operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operator {
    /// `eq`
    Eq,
    /// `ne`
    Ne,
    /// `co`
    Co,
    /// `sw`
    Sw,
    /// `ew`
    Ew,
    /// `gt`
    Gt,
    /// `ge`
    Ge,
    /// `lt`
    Lt,
    /// `le`
    Le,
    /// `pr`, the only operator that takes no literal.
    Pr,
}

impl Operator {
    /// The canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Co => "co",
            Operator::Sw => "sw",
            Operator::Ew => "ew",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Pr => "pr",
        }
    }

    /// Returns `true` if the operator is followed by a literal.
    #[must_use]
    pub const fn takes_literal(self) -> bool {
        !matches!(self, Operator::Pr)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a literal was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    /// Double-quoted, escapes left undecoded.
    String,
    /// Unquoted: a boolean, `null` or a number.
    NonString,
}

/// A completed lexeme, as reported by the [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// An attribute path, e.g. `name.givenName`.
    Path,
    /// A relational operator or `pr`.
    Operator(Operator),
    /// A literal value.
    Literal(LiteralKind),
    /// Logical `not`.
    Not,
    /// Logical `and`.
    And,
    /// Logical `or`.
    Or,
    /// `(`
    GroupOpen,
    /// `)`
    GroupClose,
    /// End of the filter, reached at depth zero.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Path => f.write_str("path"),
            Token::Operator(op) => write!(f, "operator {op}"),
            Token::Literal(LiteralKind::String) => f.write_str("string"),
            Token::Literal(LiteralKind::NonString) => f.write_str("literal"),
            Token::Not => f.write_str("not"),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
            Token::GroupOpen => f.write_str("("),
            Token::GroupClose => f.write_str(")"),
            Token::End => f.write_str("end"),
        }
    }
}
