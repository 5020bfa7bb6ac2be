//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names the context string and the expected vs actual values.

use std::f64::consts::TAU;

use bearing_engine::BearingOutput;
use bearing_types::CurveGeometry;
use host_kernel::{FeatureOperation, MemoryHost, Point3, SketchHandle};

use crate::helpers::HarnessError;

fn fail(ctx: &str, detail: String) -> Result<(), HarnessError> {
    Err(HarnessError::AssertionFailed {
        detail: format!("[{ctx}] {detail}"),
    })
}

/// Assert the generated component holds exactly two full-turn new bodies
/// revolved about the sketch's y axis.
pub fn assert_two_full_turn_bodies(
    host: &MemoryHost,
    output: &BearingOutput,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bodies = host.component_bodies(output.component);
    if bodies.len() != 2 || output.bodies.len() != 2 {
        return fail(
            ctx,
            format!(
                "expected 2 bodies, host has {} and report has {}",
                bodies.len(),
                output.bodies.len()
            ),
        );
    }
    for body in bodies {
        if body.angle != TAU {
            return fail(ctx, format!("{} revolved {} rad, expected 2π", body.handle, body.angle));
        }
        if body.operation != FeatureOperation::NewBody {
            return fail(ctx, format!("{} uses {:?}", body.handle, body.operation));
        }
        if body.axis.iter().any(|p| p.x != 0.0 || p.z != 0.0) {
            return fail(ctx, format!("{} axis {:?} is off the y axis", body.handle, body.axis));
        }
        if body.volume <= 0.0 {
            return fail(ctx, format!("{} has volume {}", body.handle, body.volume));
        }
    }
    Ok(())
}

/// Assert the sketch contains exactly one circle with the given center and radius.
pub fn assert_single_circle(
    host: &MemoryHost,
    sketch: SketchHandle,
    center: Point3,
    radius: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let Some(curves) = host.sketch_curves(sketch) else {
        return fail(ctx, format!("{sketch} not found"));
    };
    let circles: Vec<(Point3, f64)> = curves
        .iter()
        .filter_map(|c| match c.geometry {
            CurveGeometry::Circle { center, radius } => Some((center, radius)),
            CurveGeometry::Line { .. } => None,
        })
        .collect();
    match circles.as_slice() {
        [(c, r)] if c.distance_to(&center) <= tol && (r - radius).abs() <= tol => Ok(()),
        [(c, r)] => fail(
            ctx,
            format!("circle at {c:?} r={r}, expected {center:?} r={radius} (tol={tol})"),
        ),
        other => fail(ctx, format!("expected 1 circle, found {}", other.len())),
    }
}

/// Assert the document has no components, sketches or bodies left.
pub fn assert_empty_document(host: &MemoryHost, ctx: &str) -> Result<(), HarnessError> {
    if host.is_empty() {
        Ok(())
    } else {
        fail(
            ctx,
            format!(
                "document not empty: {} components, {} bodies",
                host.components().len(),
                host.body_count()
            ),
        )
    }
}

/// Assert two reports describe the same solids, body by body.
pub fn assert_same_bodies(
    a: &BearingOutput,
    b: &BearingOutput,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if a.bodies.len() != b.bodies.len() {
        return fail(
            ctx,
            format!("{} bodies vs {} bodies", a.bodies.len(), b.bodies.len()),
        );
    }
    for (i, (x, y)) in a.bodies.iter().zip(&b.bodies).enumerate() {
        if x.kinds != y.kinds {
            return fail(ctx, format!("body {i}: kinds {:?} vs {:?}", x.kinds, y.kinds));
        }
        if (x.volume - y.volume).abs() > tol {
            return fail(
                ctx,
                format!("body {i}: volume {:.9} vs {:.9} (tol={tol})", x.volume, y.volume),
            );
        }
    }
    Ok(())
}
