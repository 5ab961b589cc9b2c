//! Expression evaluation
//!
//! Turns expression trees into concrete values against a row. INSERT
//! evaluates value expressions against an empty row, so column references
//! fail there.

use crate::error::{Error, Result};
use crate::parsing::ast::{Expression, InfixOperator, PostfixOperator, PrefixOperator};
use crate::types::{Row, Value};

/// Evaluates an expression against a row.
pub fn evaluate(expression: &Expression, row: &Row) -> Result<Value> {
    match expression {
        Expression::Integer(i) => Ok(Value::Integer(*i)),
        Expression::Float(v) => Ok(Value::Float(*v)),
        Expression::Boolean(b) => Ok(Value::Boolean(*b)),
        Expression::String(s) => Ok(Value::String(s.clone())),
        Expression::Null => Ok(Value::Null),

        Expression::Column(table, name) => {
            let qualifier = table.as_deref().unwrap_or("");
            if let Some(value) = row.get(qualifier, name) {
                return Ok(value.clone());
            }
            match table {
                Some(table) => Err(Error::ExecutionError(format!(
                    "column {table}.{name} does not exist"
                ))),
                None => Err(Error::ExecutionError(format!("no such column: {name}"))),
            }
        }

        Expression::Prefix(operator, operand) => {
            let value = evaluate(operand, row)?;
            evaluate_prefix(*operator, value)
        }

        Expression::Infix(operator, lhs, rhs) => {
            let left = evaluate(lhs, row)?;
            let right = evaluate(rhs, row)?;
            evaluate_infix(*operator, left, right)
        }

        Expression::Postfix(operand, operator) => {
            let value = evaluate(operand, row)?;
            let is_null = matches!(value, Value::Null);
            Ok(match operator {
                PostfixOperator::IsNull => Value::Boolean(is_null),
                PostfixOperator::IsNotNull => Value::Boolean(!is_null),
            })
        }
    }
}

fn evaluate_prefix(operator: PrefixOperator, value: Value) -> Result<Value> {
    match (operator, value) {
        (PrefixOperator::Negate, Value::Integer(i)) => Ok(Value::Integer(i.wrapping_neg())),
        (PrefixOperator::Negate, Value::Float(v)) => Ok(Value::Float(-v)),
        (PrefixOperator::Negate, value) => Err(Error::ExecutionError(format!(
            "unknown operator: -{}",
            value.type_name()
        ))),
        (PrefixOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (PrefixOperator::Not, value) => Err(Error::ExecutionError(format!(
            "unknown operator: !{}",
            value.type_name()
        ))),
    }
}

/// Binary dispatch: integers promote to floats when the other side is a
/// float; otherwise both sides must share a kind.
fn evaluate_infix(operator: InfixOperator, left: Value, right: Value) -> Result<Value> {
    use Value::*;
    match (left, right) {
        (Integer(l), Integer(r)) => integer_infix(operator, l, r),
        (Float(l), Float(r)) => float_infix(operator, l, r),
        (Float(l), Integer(r)) => float_infix(operator, l, r as f64),
        (Integer(l), Float(r)) => float_infix(operator, l as f64, r),
        (Boolean(l), Boolean(r)) => boolean_infix(operator, l, r),
        (String(l), String(r)) => string_infix(operator, l, r),
        (left, right) => Err(Error::ExecutionError(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        ))),
    }
}

fn integer_infix(operator: InfixOperator, left: i64, right: i64) -> Result<Value> {
    use InfixOperator::*;
    Ok(match operator {
        Add => Value::Integer(left.wrapping_add(right)),
        Subtract => Value::Integer(left.wrapping_sub(right)),
        Multiply => Value::Integer(left.wrapping_mul(right)),
        Divide => {
            if right == 0 {
                return Err(Error::ExecutionError("division by zero".to_string()));
            }
            Value::Integer(left.wrapping_div(right))
        }
        Remainder => {
            if right == 0 {
                return Err(Error::ExecutionError("division by zero".to_string()));
            }
            Value::Integer(left.wrapping_rem(right))
        }
        Exponentiate => Value::Integer((left as f64).powf(right as f64) as i64),
        Equal => Value::Boolean(left == right),
        NotEqual => Value::Boolean(left != right),
        LessThan => Value::Boolean(left < right),
        LessThanOrEqual => Value::Boolean(left <= right),
        GreaterThan => Value::Boolean(left > right),
        GreaterThanOrEqual => Value::Boolean(left >= right),
        And | Or | Concat => {
            return Err(Error::ExecutionError(format!(
                "unknown integer operator: INTEGER {operator} INTEGER"
            )));
        }
    })
}

fn float_infix(operator: InfixOperator, left: f64, right: f64) -> Result<Value> {
    use InfixOperator::*;
    Ok(match operator {
        Add => Value::Float(left + right),
        Subtract => Value::Float(left - right),
        Multiply => Value::Float(left * right),
        Divide => Value::Float(left / right),
        Remainder => Value::Float(left % right),
        Exponentiate => Value::Float(left.powf(right)),
        Equal => Value::Boolean(left == right),
        NotEqual => Value::Boolean(left != right),
        LessThan => Value::Boolean(left < right),
        LessThanOrEqual => Value::Boolean(left <= right),
        GreaterThan => Value::Boolean(left > right),
        GreaterThanOrEqual => Value::Boolean(left >= right),
        And | Or | Concat => {
            return Err(Error::ExecutionError(format!(
                "unknown float operator: FLOAT {operator} FLOAT"
            )));
        }
    })
}

fn boolean_infix(operator: InfixOperator, left: bool, right: bool) -> Result<Value> {
    use InfixOperator::*;
    Ok(match operator {
        Equal => Value::Boolean(left == right),
        NotEqual => Value::Boolean(left != right),
        And => Value::Boolean(left && right),
        Or => Value::Boolean(left || right),
        _ => {
            return Err(Error::ExecutionError(format!(
                "unknown boolean operator: BOOLEAN {operator} BOOLEAN"
            )));
        }
    })
}

fn string_infix(operator: InfixOperator, left: String, right: String) -> Result<Value> {
    use InfixOperator::*;
    Ok(match operator {
        Equal => Value::Boolean(left == right),
        NotEqual => Value::Boolean(left != right),
        LessThan => Value::Boolean(left < right),
        LessThanOrEqual => Value::Boolean(left <= right),
        GreaterThan => Value::Boolean(left > right),
        GreaterThanOrEqual => Value::Boolean(left >= right),
        Concat => Value::String(left + &right),
        _ => {
            return Err(Error::ExecutionError(format!(
                "unknown string operator: STRING {operator} STRING"
            )));
        }
    })
}
