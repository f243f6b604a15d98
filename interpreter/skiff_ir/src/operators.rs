//! Binary and unary operators.
//!
//! Every operator text the lexical profile accepts maps to a variant here,
//! including the ones the evaluator leaves unimplemented (logical, bitwise,
//! shift, compound assignment); those parse normally and evaluate to
//! Boolean false. Plain `=` is not a binary operator — assignment is a
//! distinct syntax form handled at the postfix tier.

/// Binary operators, one per lexable operator text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Parsed but unevaluated (yield Boolean false)
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Tilde,
    Shl,
    Shr,
    AddAssign,
    SubAssign,
}

impl BinaryOp {
    /// Source-level symbol, used in error messages and tests.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "~=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Tilde => "~",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
        }
    }

    /// Map an operator text to its variant. `=` maps to nothing.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "==" => Self::Eq,
            "~=" => Self::NotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "&&" => Self::And,
            "||" => Self::Or,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "~" => Self::Tilde,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            "+=" => Self::AddAssign,
            "-=" => Self::SubAssign,
            _ => return None,
        })
    }
}

/// Unary operators. The grammar only accepts prefix `-`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
        }
    }
}
