//! Bullet gravity multiplier from a gun's ballistic drop settings.
//!
//! The projectile starts level, rises by its heading's vertical component times `travel` each
//! step, then dips its heading by `drop` and renormalises. The multiplier is the gravity that
//! would produce the same rise over `steps` physics ticks of 20 ms. `steps` is limited to
//! [`MAX_STEPS`]; anything outside `0..=MAX_STEPS` (or not finite) yields no value.

use std::sync::Arc;

use crate::expression::catalog::{ArgumentHint, ArityMask, ExpressionFunction};
use crate::expression::math::real;
use crate::value::{Value, ValueKind};

const TICK_SECONDS: f64 = 0.02;
const GRAVITY: f64 = -9.81;
/// Upper bound on simulated ticks, a little over five hours of flight.
const MAX_STEPS: u32 = 1_000_000;

#[derive(Debug)]
struct BallisticGravity;

/// Number of whole ticks the loop runs for `steps`.
fn tick_count(steps: f64) -> Option<u32> {
    (0.0..=f64::from(MAX_STEPS))
        .contains(&steps)
        .then(|| steps.ceil() as u32)
}

fn multiplier_f64(travel: f64, steps: f64, ticks: u32, drop: f64) -> f64 {
    let mut rise = 0.0;
    let (mut x, mut y) = (1.0_f64, 0.0_f64);
    for _ in 0..ticks {
        rise += y * travel;
        y -= drop;
        let len = x.hypot(y);
        x /= len;
        y /= len;
    }
    let seconds = steps * TICK_SECONDS;
    2.0 * rise / (seconds * seconds) / GRAVITY
}

fn multiplier_f32(travel: f32, steps: f32, ticks: u32, drop: f32) -> f32 {
    let mut rise = 0.0_f32;
    let (mut x, mut y) = (1.0_f32, 0.0_f32);
    for _ in 0..ticks {
        rise += y * travel;
        y -= drop;
        let len = (x * x + y * y).sqrt();
        x /= len;
        y /= len;
    }
    let seconds = steps * TICK_SECONDS as f32;
    2.0 * rise / (seconds * seconds) / GRAVITY as f32
}

impl ExpressionFunction for BallisticGravity {
    fn name(&self) -> &str {
        "CUSTOM_BALLISTIC_GRAV"
    }

    fn arity(&self) -> ArityMask {
        ArityMask::THREE
    }

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Kind(ValueKind::F32)
    }

    fn evaluate3(
        &self,
        a: &Value<'_>,
        b: &Value<'_>,
        c: &Value<'_>,
        out: ValueKind,
    ) -> Option<Value<'static>> {
        let travel = real(a, ValueKind::F64)?;
        let steps = real(b, ValueKind::F64)?;
        let drop = real(c, ValueKind::F64)?;
        let ticks = tick_count(steps)?;
        if out == ValueKind::F32 {
            Some(Value::F32(multiplier_f32(
                travel as f32,
                steps as f32,
                ticks,
                drop as f32,
            )))
        } else {
            Some(Value::F64(multiplier_f64(travel, steps, ticks, drop)))
        }
    }
}

pub(super) fn function() -> Arc<dyn ExpressionFunction> {
    Arc::new(BallisticGravity)
}
