//! Translates a raw `/calc/{operation}/...` request into a validated
//! engine call. Nothing here touches the engine until every segment has
//! been accounted for and parsed.

use std::borrow::Cow;

use tracing::debug;

use crate::engine::Calculator;
use crate::error::{CalcError, CalcResult};
use crate::models::{Number, Operation};

#[derive(Debug, Clone, PartialEq)]
pub struct CalcRequest {
    pub operation: Operation,
    pub operands: Vec<Number>,
}

/// Split the operand tail of the path into percent-decoded segments.
///
/// `None` (no tail at all) and `""` (a bare trailing slash) both mean no
/// segments were supplied. Segments that do not decode to UTF-8 are kept
/// as sent and fail later as invalid operands.
pub fn split_segments(tail: Option<&str>) -> Vec<String> {
    match tail {
        None | Some("") => Vec::new(),
        Some(tail) => tail.split('/').map(decode_segment).collect(),
    }
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Resolve the operation, check the path shape, then parse operands.
///
/// Shape problems are 404s and take precedence over parse failures, so
/// `/calc/add/hola` is a missing parameter rather than an invalid operand.
/// A missing or empty segment is reported before a surplus one.
pub fn parse_request<S: AsRef<str>>(operation: &str, segments: &[S]) -> CalcResult<CalcRequest> {
    let operation = Operation::from_name(operation)
        .ok_or_else(|| CalcError::NotFound(format!("unknown operation '{}'", operation)))?;

    let arity = operation.arity();

    if segments.len() < arity || segments.iter().any(|s| s.as_ref().is_empty()) {
        return Err(CalcError::MissingParameter(format!(
            "{} requires {} operand(s) in the path",
            operation, arity
        )));
    }

    if segments.len() > arity {
        return Err(CalcError::NotFound(format!(
            "{} takes {} operand(s), got {}",
            operation,
            arity,
            segments.len()
        )));
    }

    let operands = segments
        .iter()
        .map(|raw| Number::parse(raw.as_ref()))
        .collect::<CalcResult<Vec<_>>>()?;

    debug!("Parsed {} request with operands {:?}", operation, operands);

    Ok(CalcRequest {
        operation,
        operands,
    })
}

pub async fn dispatch<S: AsRef<str>>(
    calculator: &Calculator,
    operation: &str,
    segments: &[S],
) -> CalcResult<Number> {
    let request = parse_request(operation, segments)?;
    calculator
        .evaluate(request.operation, &request.operands)
        .await
}
