use std::sync::Arc;

use crate::expression::catalog::{ArgumentHint, ArityMask, ExpressionFunction};
use crate::expression::math::{RoundingOp, real, real_result, rounding};
use crate::value::{Value, ValueKind};

#[derive(Debug)]
struct Rounding {
    name: &'static str,
    op: RoundingOp,
}

impl ExpressionFunction for Rounding {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> ArityMask {
        ArityMask::ONE
    }

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Numeric
    }

    fn evaluate1(&self, a: &Value<'_>, out: ValueKind) -> Option<Value<'static>> {
        rounding(self.op, a, out)
    }
}

#[derive(Debug)]
struct Sqrt;

impl ExpressionFunction for Sqrt {
    fn name(&self) -> &str {
        "SQRT"
    }

    fn arity(&self) -> ArityMask {
        ArityMask::ONE
    }

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Kind(ValueKind::F64)
    }

    fn evaluate1(&self, a: &Value<'_>, out: ValueKind) -> Option<Value<'static>> {
        Some(real_result(real(a, out)?.sqrt(), out))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrigOp {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl TrigOp {
    fn is_inverse(self) -> bool {
        matches!(self, Self::Asin | Self::Acos | Self::Atan)
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
        }
    }
}

/// Trigonometry in radians or degrees. Degrees apply to the input of forward functions and to
/// the output of inverse ones.
#[derive(Debug)]
struct Trig {
    name: &'static str,
    op: TrigOp,
    degrees: bool,
}

impl Trig {
    fn angle_out(&self, radians: f64) -> f64 {
        if self.degrees {
            radians.to_degrees()
        } else {
            radians
        }
    }
}

impl ExpressionFunction for Trig {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> ArityMask {
        if self.op == TrigOp::Atan {
            ArityMask::ONE.union(ArityMask::TWO)
        } else {
            ArityMask::ONE
        }
    }

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Kind(ValueKind::F64)
    }

    fn evaluate1(&self, a: &Value<'_>, out: ValueKind) -> Option<Value<'static>> {
        let x = real(a, out)?;
        let result = if self.op.is_inverse() {
            self.angle_out(self.op.apply(x))
        } else if self.degrees {
            self.op.apply(x.to_radians())
        } else {
            self.op.apply(x)
        };
        Some(real_result(result, out))
    }

    /// Two-argument arctangent of `a / b`, quadrant-aware.
    fn evaluate2(&self, a: &Value<'_>, b: &Value<'_>, out: ValueKind) -> Option<Value<'static>> {
        if self.op != TrigOp::Atan {
            return None;
        }
        let y = real(a, out)?;
        let x = real(b, out)?;
        Some(real_result(self.angle_out(y.atan2(x)), out))
    }
}

pub(super) fn all() -> Vec<Arc<dyn ExpressionFunction>> {
    let mut out: Vec<Arc<dyn ExpressionFunction>> = vec![
        Arc::new(Rounding {
            name: "ABS",
            op: RoundingOp::Abs,
        }),
        Arc::new(Rounding {
            name: "ROUND",
            op: RoundingOp::Round,
        }),
        Arc::new(Rounding {
            name: "FLOOR",
            op: RoundingOp::Floor,
        }),
        Arc::new(Rounding {
            name: "CEIL",
            op: RoundingOp::Ceil,
        }),
        Arc::new(Sqrt),
    ];

    let trig = [
        ("SINR", "SIND", TrigOp::Sin),
        ("COSR", "COSD", TrigOp::Cos),
        ("TANR", "TAND", TrigOp::Tan),
        ("ASINR", "ASIND", TrigOp::Asin),
        ("ACOSR", "ACOSD", TrigOp::Acos),
        ("ATANR", "ATAND", TrigOp::Atan),
    ];
    for (radians, degrees, op) in trig {
        out.push(Arc::new(Trig {
            name: radians,
            op,
            degrees: false,
        }));
        out.push(Arc::new(Trig {
            name: degrees,
            op,
            degrees: true,
        }));
    }
    out
}
