use crate::runtime::{
    error::{RtResult, RuntimeError},
    heap::ValueRef,
    value::Value,
};

use super::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    fn verb(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "subtract",
            ArithOp::Mul => "multiply",
            ArithOp::Div => "divide",
            ArithOp::Mod => "take the modulo of",
        }
    }

    fn ints(self, l: i64, r: i64) -> RtResult<i64> {
        if r == 0 && matches!(self, ArithOp::Div | ArithOp::Mod) {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(match self {
            ArithOp::Add => l.wrapping_add(r),
            ArithOp::Sub => l.wrapping_sub(r),
            ArithOp::Mul => l.wrapping_mul(r),
            ArithOp::Div => l.wrapping_div(r),
            ArithOp::Mod => l.wrapping_rem(r),
        })
    }

    fn floats(self, l: f64, r: f64) -> RtResult<f64> {
        match self {
            ArithOp::Add => Ok(l + r),
            ArithOp::Sub => Ok(l - r),
            ArithOp::Mul => Ok(l * r),
            ArithOp::Div if r == 0.0 => Err(RuntimeError::DivisionByZero),
            ArithOp::Div => Ok(l / r),
            // Modulo is only defined on two integers.
            ArithOp::Mod => Err(RuntimeError::invalid_operands(self.verb(), "Float", "Float")),
        }
    }
}

impl Runtime {
    pub fn add(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.arithmetic(ArithOp::Add, a, b)
    }

    pub fn subtract(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.arithmetic(ArithOp::Sub, a, b)
    }

    pub fn multiply(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.arithmetic(ArithOp::Mul, a, b)
    }

    pub fn divide(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.arithmetic(ArithOp::Div, a, b)
    }

    pub fn modulo(&mut self, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        self.arithmetic(ArithOp::Mod, a, b)
    }

    /// Applies `op` to two numbers. Mixed Int/Float operands promote to
    /// Float; integer results wrap on overflow.
    pub(crate) fn arithmetic(&mut self, op: ArithOp, a: ValueRef, b: ValueRef) -> RtResult<ValueRef> {
        let result = self
            .compute(op, a, b)
            .and_then(|value| self.alloc_value(value));
        self.checked(result)
    }

    fn compute(&self, op: ArithOp, a: ValueRef, b: ValueRef) -> RtResult<Value> {
        let left = self.value(a)?;
        let right = self.value(b)?;
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => op.ints(*l, *r).map(Value::Int),
            (Value::Float(l), Value::Float(r)) => op.floats(*l, *r).map(Value::Float),
            (Value::Int(l), Value::Float(r)) if op != ArithOp::Mod => {
                op.floats(*l as f64, *r).map(Value::Float)
            }
            (Value::Float(l), Value::Int(r)) if op != ArithOp::Mod => {
                op.floats(*l, *r as f64).map(Value::Float)
            }
            _ => Err(RuntimeError::invalid_operands(
                op.verb(),
                left.type_name(),
                right.type_name(),
            )),
        }
    }
}
