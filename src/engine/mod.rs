//! Arithmetic engine.
//!
//! Every operation takes already-parsed [`Number`]s and returns a tagged
//! [`Number`] or a typed [`CalcError`]. Integer arithmetic is exact; only
//! division, roots, logarithms and non-integer powers go through `f64`.
//! Only `multiply` has a side channel: the injected [`PermissionCheck`].

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use std::sync::Arc;
use tracing::debug;

use crate::error::{CalcError, CalcResult};
use crate::models::{Number, Operation};
use crate::security::PermissionCheck;

/// Upper bound on the size of an exact integer power, in bits (about
/// 30 000 decimal digits). Larger powers are a domain error.
pub const MAX_POWER_BITS: u64 = 100_000;

#[derive(Clone)]
pub struct Calculator {
    permissions: Arc<dyn PermissionCheck>,
}

impl Calculator {
    pub fn new(permissions: Arc<dyn PermissionCheck>) -> Self {
        Self { permissions }
    }

    /// Run `operation` over `operands`, which must match its arity.
    pub async fn evaluate(&self, operation: Operation, operands: &[Number]) -> CalcResult<Number> {
        debug!("Evaluating {} with {} operand(s)", operation, operands.len());

        match (operation, operands) {
            (Operation::Add, [a, b]) => self.add(a, b),
            (Operation::Substract, [a, b]) => self.substract(a, b),
            (Operation::Multiply, [a, b]) => self.multiply(a, b).await,
            (Operation::Divide, [a, b]) => self.divide(a, b),
            (Operation::Power, [a, b]) => self.power(a, b),
            (Operation::Sqrt, [x]) => self.sqrt(x),
            (Operation::Log10, [x]) => self.log10(x),
            _ => Err(CalcError::MissingParameter(format!(
                "{} expects {} operand(s), got {}",
                operation,
                operation.arity(),
                operands.len()
            ))),
        }
    }

    pub fn add(&self, a: &Number, b: &Number) -> CalcResult<Number> {
        match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x + y)),
            _ => Number::real(a.as_f64()? + b.as_f64()?),
        }
    }

    pub fn substract(&self, a: &Number, b: &Number) -> CalcResult<Number> {
        match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x - y)),
            _ => Number::real(a.as_f64()? - b.as_f64()?),
        }
    }

    pub async fn multiply(&self, a: &Number, b: &Number) -> CalcResult<Number> {
        if !self.permissions.may_multiply(a, b).await {
            return Err(CalcError::PermissionDenied(
                "user has no permissions to multiply".to_string(),
            ));
        }

        match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x * y)),
            _ => Number::real(a.as_f64()? * b.as_f64()?),
        }
    }

    /// Division by zero is reported as an invalid operand, the same kind
    /// as a non-numeric input.
    pub fn divide(&self, a: &Number, b: &Number) -> CalcResult<Number> {
        if b.is_zero() {
            return Err(CalcError::InvalidOperand(
                "division by zero is not possible".to_string(),
            ));
        }
        Number::real(a.as_f64()? / b.as_f64()?)
    }

    pub fn power(&self, base: &Number, exponent: &Number) -> CalcResult<Number> {
        if base.is_zero() && exponent.is_negative() {
            return Err(CalcError::DomainError(
                "zero cannot be raised to a negative power".to_string(),
            ));
        }

        match (base, exponent) {
            (Number::Integer(b), Number::Integer(e)) if !exponent.is_negative() => {
                integer_power(b, e).map(Number::Integer)
            }
            (Number::Integer(_), Number::Integer(e)) => {
                let b = base.as_f64()?;
                match e.to_i32() {
                    Some(e) => Number::real(b.powi(e)),
                    None => Number::real(b.powf(exponent.as_f64()?)),
                }
            }
            _ => {
                let (b, e) = (base.as_f64()?, exponent.as_f64()?);
                if b < 0.0 && e.fract() != 0.0 {
                    return Err(CalcError::DomainError(
                        "fractional power of a negative number is undefined".to_string(),
                    ));
                }
                Number::real(b.powf(e))
            }
        }
    }

    pub fn sqrt(&self, x: &Number) -> CalcResult<Number> {
        if x.is_negative() {
            return Err(CalcError::DomainError(
                "square root of a negative number is undefined".to_string(),
            ));
        }
        Number::real(x.as_f64()?.sqrt())
    }

    pub fn log10(&self, x: &Number) -> CalcResult<Number> {
        if x.is_negative() || x.is_zero() {
            return Err(CalcError::DomainError(
                "logarithm is only defined for positive numbers".to_string(),
            ));
        }
        Number::real(x.as_f64()?.log10())
    }
}

/// Exact `base^exponent` for a non-negative exponent, bounded by
/// [`MAX_POWER_BITS`]. Bases 0, 1 and -1 never grow, whatever the exponent.
fn integer_power(base: &BigInt, exponent: &BigInt) -> CalcResult<BigInt> {
    if exponent.is_zero() {
        return Ok(BigInt::one());
    }
    if base.is_zero() || base.is_one() {
        return Ok(base.clone());
    }
    if *base == -BigInt::one() {
        let odd = exponent % 2u32 != BigInt::zero();
        return Ok(if odd { base.clone() } else { BigInt::one() });
    }

    let too_large = || {
        CalcError::DomainError(format!(
            "power result exceeds {} bits",
            MAX_POWER_BITS
        ))
    };

    let e = exponent.to_u32().ok_or_else(too_large)?;
    if base.bits().saturating_mul(u64::from(e)) > MAX_POWER_BITS {
        return Err(too_large());
    }
    Ok(base.pow(e))
}
