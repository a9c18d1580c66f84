use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalcError, CalcResult};

/// A numeric operand or result.
///
/// The tag records whether the value is an exact integer or a real, and
/// rendering follows the tag rather than the value: `Real(2.0)` renders as
/// `"2.0"` while `Integer(2)` renders as `"2"`. Integers are unbounded.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(BigInt),
    Real(f64),
}

impl Number {
    /// Parse a raw path segment.
    ///
    /// Text containing a `.` is read as a real, anything else must be a
    /// decimal integer literal of any width.
    pub fn parse(raw: &str) -> CalcResult<Self> {
        let invalid =
            || CalcError::InvalidOperand(format!("'{}' cannot be converted to a number", raw));

        if raw.contains('.') {
            let value: f64 = raw.parse().map_err(|_| invalid())?;
            return Number::real(value).map_err(|_| invalid());
        }

        raw.parse::<BigInt>()
            .map(Number::Integer)
            .map_err(|_| invalid())
    }

    /// Wrap a real, rejecting infinities and NaN.
    pub fn real(value: f64) -> CalcResult<Self> {
        if value.is_finite() {
            Ok(Number::Real(value))
        } else {
            Err(CalcError::DomainError(
                "result is outside the representable range".to_string(),
            ))
        }
    }

    /// Real value for floating-point paths. Integers too wide for an `f64`
    /// are a domain error rather than an infinity.
    pub fn as_f64(&self) -> CalcResult<f64> {
        let value = match self {
            Number::Integer(value) => value.to_f64().unwrap_or(f64::INFINITY),
            Number::Real(value) => *value,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::DomainError(format!(
                "{} is too large for real arithmetic",
                self
            )))
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(value) => value.is_zero(),
            Number::Real(value) => *value == 0.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(value) => value.is_negative(),
            Number::Real(value) => *value < 0.0,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::Integer(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Real(value) => f.write_str(&format_real(*value)),
        }
    }
}

/// Shortest round-trip rendering with a mandatory decimal point, switching
/// to `1e+16` / `1e-05` style exponents outside `[1e-4, 1e16)`.
fn format_real(value: f64) -> String {
    // Debug already keeps the ".0" and picks the same exponent thresholds
    let repr = format!("{:?}", value);

    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Substract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Log10,
}

impl Operation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Operation::Add),
            "substract" => Some(Operation::Substract),
            "multiply" => Some(Operation::Multiply),
            "divide" => Some(Operation::Divide),
            "power" => Some(Operation::Power),
            "sqrt" => Some(Operation::Sqrt),
            "log10" => Some(Operation::Log10),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Substract => "substract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Sqrt => "sqrt",
            Operation::Log10 => "log10",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operation::Sqrt | Operation::Log10 => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!(Number::parse("2").unwrap(), Number::from(2));
        assert_eq!(Number::parse("-7").unwrap(), Number::from(-7));
        assert_eq!(Number::parse("+3").unwrap(), Number::from(3));
        assert_eq!(Number::parse("-0").unwrap(), Number::from(0));
    }

    #[test]
    fn test_parse_reals() {
        assert_eq!(Number::parse("2.5").unwrap(), Number::Real(2.5));
        assert_eq!(Number::parse("1.").unwrap(), Number::Real(1.0));
        assert_eq!(Number::parse("1.5e3").unwrap(), Number::Real(1500.0));
        assert!(Number::parse("-0.0").unwrap().is_zero());
    }

    #[test]
    fn test_parse_wide_integer_stays_exact() {
        let parsed = Number::parse("99999999999999999999").unwrap();
        assert!(matches!(parsed, Number::Integer(_)));
        assert_eq!(parsed.to_string(), "99999999999999999999");
    }

    #[test]
    fn test_as_f64_rejects_huge_integers() {
        let huge = Number::parse(&format!("1{}", "0".repeat(400))).unwrap();
        assert!(matches!(huge.as_f64(), Err(CalcError::DomainError(_))));
        assert_eq!(Number::from(-3).as_f64().unwrap(), -3.0);
    }

    #[test]
    fn test_parse_rejects_text() {
        for raw in ["hola", "", "1e3", "inf", "nan", "NaN.", "1.0e999", "2,5", "0x10", "."] {
            assert!(
                matches!(Number::parse(raw), Err(CalcError::InvalidOperand(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_render_integers_without_point() {
        assert_eq!(Number::from(4).to_string(), "4");
        assert_eq!(Number::from(0).to_string(), "0");
        assert_eq!(Number::from(-2).to_string(), "-2");
    }

    #[test]
    fn test_render_reals_with_point() {
        assert_eq!(Number::Real(2.0).to_string(), "2.0");
        assert_eq!(Number::Real(4.0).to_string(), "4.0");
        assert_eq!(Number::Real(1.5).to_string(), "1.5");
        assert_eq!(Number::Real(0.1).to_string(), "0.1");
        assert_eq!(Number::Real(-0.0).to_string(), "-0.0");
        assert_eq!(Number::Real(0.0001).to_string(), "0.0001");
    }

    #[test]
    fn test_render_reals_with_exponent() {
        assert_eq!(Number::Real(1e16).to_string(), "1e+16");
        assert_eq!(Number::Real(1.5e20).to_string(), "1.5e+20");
        assert_eq!(Number::Real(1e-5).to_string(), "1e-05");
        assert_eq!(Number::Real(2.5e-100).to_string(), "2.5e-100");
    }

    #[test]
    fn test_operation_names_round_trip() {
        for name in ["add", "substract", "multiply", "divide", "power", "sqrt", "log10"] {
            let op = Operation::from_name(name).unwrap();
            assert_eq!(op.name(), name);
        }
        assert!(Operation::from_name("subtract").is_none());
        assert!(Operation::from_name("ADD").is_none());
    }

    #[test]
    fn test_operation_arity() {
        assert_eq!(Operation::Add.arity(), 2);
        assert_eq!(Operation::Power.arity(), 2);
        assert_eq!(Operation::Sqrt.arity(), 1);
        assert_eq!(Operation::Log10.arity(), 1);
    }

    proptest! {
        #[test]
        fn prop_integer_literals_render_verbatim(raw in "-?[1-9][0-9]{0,60}") {
            let parsed = Number::parse(&raw).unwrap();
            prop_assert!(matches!(parsed, Number::Integer(_)));
            prop_assert_eq!(parsed.to_string(), raw);
        }

        #[test]
        fn prop_alphabetic_text_is_invalid(raw in "[A-Za-z]{1,12}") {
            prop_assert!(matches!(Number::parse(&raw), Err(CalcError::InvalidOperand(_))));
        }
    }
}
