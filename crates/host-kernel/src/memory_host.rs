//! MemoryHost: in-process reference document implementing ModelingHost.
//!
//! Keeps components, sketches, curves, and bodies in memory. Profiles are
//! computed from the sketch's curve arrangement; revolved bodies are evaluated
//! with Pappus' centroid theorem. Supports fault injection per call kind so
//! callers can exercise their failure paths.

use std::collections::HashMap;
use std::f64::consts::TAU;

use bearing_types::CurveGeometry;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::arrangement;
use crate::regions::{self, Region};
use crate::traits::ModelingHost;
use crate::types::*;

/// A curve stored in a sketch.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchCurve {
    pub handle: CurveHandle,
    pub geometry: CurveGeometry,
}

/// A solid body created by a revolve feature.
#[derive(Debug, Clone)]
pub struct Body {
    pub handle: BodyHandle,
    pub component: ComponentHandle,
    pub sketch: SketchHandle,
    pub profiles: Vec<ProfileId>,
    /// Start and end point of the axis line.
    pub axis: [Point3; 2],
    pub angle: f64,
    pub operation: FeatureOperation,
    /// Solid volume in cm³.
    pub volume: f64,
}

#[derive(Debug, Clone)]
struct ComponentRecord {
    handle: ComponentHandle,
    name: String,
}

#[derive(Debug, Clone)]
struct SketchRecord {
    component: ComponentHandle,
    plane: ConstructionPlane,
    curves: Vec<SketchCurve>,
    /// Regions of the current curve set. Cleared whenever a curve is added.
    regions: Option<Vec<Region>>,
    /// Bumped on every added curve.
    revision: u64,
    /// Revision the last `profiles()` answer was computed for. Profile ids
    /// are only accepted by `revolve` while this matches `revision`.
    issued: Option<u64>,
}

/// In-memory modeling host.
pub struct MemoryHost {
    tolerance: Tolerance,
    next_curve: u64,
    components: Vec<ComponentRecord>,
    sketches: HashMap<SketchHandle, SketchRecord>,
    bodies: Vec<Body>,
    calls: HashMap<HostCall, usize>,
    failures: Vec<(HostCall, usize)>,
    messages: Vec<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::with_tolerance(Tolerance::default())
    }

    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            next_curve: 1,
            components: Vec::new(),
            sketches: HashMap::new(),
            bodies: Vec::new(),
            calls: HashMap::new(),
            failures: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Make the `occurrence`-th call (1-based) of kind `call` fail.
    pub fn inject_failure(&mut self, call: HostCall, occurrence: usize) {
        self.failures.push((call, occurrence));
    }

    /// Number of calls of one kind issued so far, failed ones included.
    pub fn call_count(&self, call: HostCall) -> usize {
        self.calls.get(&call).copied().unwrap_or(0)
    }

    /// Number of host calls issued so far.
    pub fn total_calls(&self) -> usize {
        self.calls.values().sum()
    }

    /// Messages passed to `report_failure`, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// True when the document holds no components, sketches, or bodies.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.sketches.is_empty() && self.bodies.is_empty()
    }

    /// Components in creation order.
    pub fn components(&self) -> Vec<ComponentHandle> {
        self.components.iter().map(|c| c.handle).collect()
    }

    pub fn component_name(&self, component: ComponentHandle) -> Option<&str> {
        self.components
            .iter()
            .find(|c| c.handle == component)
            .map(|c| c.name.as_str())
    }

    pub fn component_sketches(&self, component: ComponentHandle) -> Vec<SketchHandle> {
        self.sketches
            .iter()
            .filter(|(_, s)| s.component == component)
            .map(|(h, _)| *h)
            .collect()
    }

    /// Bodies of a component in creation order.
    pub fn component_bodies(&self, component: ComponentHandle) -> Vec<&Body> {
        self.bodies
            .iter()
            .filter(|b| b.component == component)
            .collect()
    }

    pub fn body(&self, body: BodyHandle) -> Option<&Body> {
        self.bodies.iter().find(|b| b.handle == body)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn sketch_curves(&self, sketch: SketchHandle) -> Option<&[SketchCurve]> {
        self.sketches.get(&sketch).map(|s| s.curves.as_slice())
    }

    pub fn sketch_plane(&self, sketch: SketchHandle) -> Option<ConstructionPlane> {
        self.sketches.get(&sketch).map(|s| s.plane)
    }

    fn begin(&mut self, call: HostCall) -> Result<(), HostError> {
        let count = self.calls.entry(call).or_insert(0);
        *count += 1;
        let occurrence = *count;
        if self.failures.contains(&(call, occurrence)) {
            debug!(%call, occurrence, "injected host failure");
            return Err(HostError::Injected { call, occurrence });
        }
        Ok(())
    }

    fn has_component(&self, component: ComponentHandle) -> bool {
        self.components.iter().any(|c| c.handle == component)
    }

    fn sketch_mut(&mut self, sketch: SketchHandle) -> Result<&mut SketchRecord, HostError> {
        self.sketches
            .get_mut(&sketch)
            .ok_or_else(|| HostError::not_found(sketch))
    }

    fn check_point(&self, p: &Point3) -> Result<(), HostError> {
        if !p.is_finite() {
            return Err(HostError::invalid(format!("non-finite point {p:?}")));
        }
        if p.z.abs() > self.tolerance.weld {
            return Err(HostError::invalid(format!(
                "point {p:?} is off the sketch plane"
            )));
        }
        Ok(())
    }

    fn push_curve(
        &mut self,
        sketch: SketchHandle,
        geometry: CurveGeometry,
    ) -> Result<CurveHandle, HostError> {
        let handle = CurveHandle(self.next_curve);
        let record = self.sketch_mut(sketch)?;
        record.curves.push(SketchCurve { handle, geometry });
        record.regions = None;
        record.revision += 1;
        self.next_curve += 1;
        Ok(handle)
    }

    fn line_geometry(&self, start: Point3, end: Point3) -> Result<CurveGeometry, HostError> {
        self.check_point(&start)?;
        self.check_point(&end)?;
        if start.distance_to(&end) <= self.tolerance.weld {
            return Err(HostError::invalid(format!(
                "zero-length line at {start:?}"
            )));
        }
        Ok(CurveGeometry::Line { start, end })
    }

    fn offset_geometry(
        &self,
        curve: &SketchCurve,
        direction_point: Point3,
        distance: f64,
    ) -> Result<CurveGeometry, HostError> {
        let tol = self.tolerance.weld;
        match curve.geometry {
            CurveGeometry::Line { start, end } => {
                let len = start.distance_to(&end);
                let normal = [-(end.y - start.y) / len, (end.x - start.x) / len];
                let side = (direction_point.x - start.x) * normal[0]
                    + (direction_point.y - start.y) * normal[1];
                if side.abs() <= tol {
                    return Err(HostError::OffsetFailed {
                        reason: format!("direction point lies on {}", curve.handle),
                    });
                }
                let shift = [
                    normal[0] * distance * side.signum(),
                    normal[1] * distance * side.signum(),
                ];
                Ok(CurveGeometry::Line {
                    start: Point3::new(start.x + shift[0], start.y + shift[1], start.z),
                    end: Point3::new(end.x + shift[0], end.y + shift[1], end.z),
                })
            }
            CurveGeometry::Circle { center, radius } => {
                let d = center.distance_to(&direction_point);
                if (d - radius).abs() <= tol {
                    return Err(HostError::OffsetFailed {
                        reason: format!("direction point lies on {}", curve.handle),
                    });
                }
                let radius = if d > radius {
                    radius + distance
                } else {
                    radius - distance
                };
                if radius <= tol {
                    return Err(HostError::OffsetFailed {
                        reason: format!("offset collapses {}", curve.handle),
                    });
                }
                Ok(CurveGeometry::Circle { center, radius })
            }
        }
    }

    /// Regions of a sketch, computing them if the curve set changed.
    fn regions(&mut self, sketch: SketchHandle) -> Result<&[Region], HostError> {
        let tolerance = self.tolerance;
        let record = self.sketch_mut(sketch)?;
        if record.regions.is_none() {
            let curves: Vec<(CurveHandle, CurveGeometry)> = record
                .curves
                .iter()
                .map(|c| (c.handle, c.geometry.clone()))
                .collect();
            let arr = arrangement::build(&curves, tolerance.weld);
            let found = regions::extract_regions(&arr, &tolerance);
            debug!(
                %sketch,
                curves = curves.len(),
                vertices = arr.vertices.len(),
                edges = arr.edges.len(),
                regions = found.len(),
                "computed sketch regions"
            );
            record.regions = Some(found);
        }
        Ok(record.regions.as_deref().unwrap_or_default())
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelingHost for MemoryHost {
    fn add_component(&mut self) -> Result<ComponentHandle, HostError> {
        self.begin(HostCall::AddComponent)?;
        let handle = ComponentHandle(Uuid::new_v4());
        self.components.push(ComponentRecord {
            handle,
            name: format!("Component{}", self.components.len() + 1),
        });
        debug!(%handle, "added component");
        Ok(handle)
    }

    fn set_component_name(
        &mut self,
        component: ComponentHandle,
        name: &str,
    ) -> Result<(), HostError> {
        self.begin(HostCall::SetComponentName)?;
        let record = self
            .components
            .iter_mut()
            .find(|c| c.handle == component)
            .ok_or_else(|| HostError::not_found(component))?;
        record.name = name.to_string();
        Ok(())
    }

    fn construction_plane(
        &self,
        component: ComponentHandle,
        plane: ConstructionPlane,
    ) -> Result<PlaneHandle, HostError> {
        if !self.has_component(component) {
            return Err(HostError::not_found(component));
        }
        Ok(PlaneHandle { component, plane })
    }

    fn add_sketch(
        &mut self,
        component: ComponentHandle,
        plane: PlaneHandle,
    ) -> Result<SketchHandle, HostError> {
        self.begin(HostCall::AddSketch)?;
        if !self.has_component(component) {
            return Err(HostError::not_found(component));
        }
        if plane.component != component {
            return Err(HostError::invalid(format!(
                "plane {:?} belongs to {}",
                plane.plane, plane.component
            )));
        }
        let handle = SketchHandle(Uuid::new_v4());
        self.sketches.insert(
            handle,
            SketchRecord {
                component,
                plane: plane.plane,
                curves: Vec::new(),
                regions: None,
                revision: 0,
                issued: None,
            },
        );
        debug!(%handle, plane = ?plane.plane, "added sketch");
        Ok(handle)
    }

    fn add_line(
        &mut self,
        sketch: SketchHandle,
        start: Point3,
        end: Point3,
    ) -> Result<CurveHandle, HostError> {
        self.begin(HostCall::AddLine)?;
        let geometry = self.line_geometry(start, end)?;
        self.push_curve(sketch, geometry)
    }

    fn add_two_point_rectangle(
        &mut self,
        sketch: SketchHandle,
        first: Point3,
        second: Point3,
    ) -> Result<[CurveHandle; 4], HostError> {
        self.begin(HostCall::AddRectangle)?;
        self.check_point(&first)?;
        self.check_point(&second)?;
        let tol = self.tolerance.weld;
        if (second.x - first.x).abs() <= tol || (second.y - first.y).abs() <= tol {
            return Err(HostError::invalid(format!(
                "degenerate rectangle {first:?} .. {second:?}"
            )));
        }
        if !self.sketches.contains_key(&sketch) {
            return Err(HostError::not_found(sketch));
        }

        let corners = [
            first,
            Point3::new(second.x, first.y, 0.0),
            second,
            Point3::new(first.x, second.y, 0.0),
        ];
        let mut edges = [CurveHandle(0); 4];
        for (i, edge) in edges.iter_mut().enumerate() {
            let geometry = CurveGeometry::Line {
                start: corners[i],
                end: corners[(i + 1) % 4],
            };
            *edge = self.push_curve(sketch, geometry)?;
        }
        Ok(edges)
    }

    fn add_circle(
        &mut self,
        sketch: SketchHandle,
        center: Point3,
        radius: f64,
    ) -> Result<CurveHandle, HostError> {
        self.begin(HostCall::AddCircle)?;
        self.check_point(&center)?;
        if !radius.is_finite() || radius <= self.tolerance.weld {
            return Err(HostError::invalid(format!("circle radius {radius}")));
        }
        self.push_curve(sketch, CurveGeometry::Circle { center, radius })
    }

    fn offset(
        &mut self,
        sketch: SketchHandle,
        curves: &[CurveHandle],
        direction_point: Point3,
        distance: f64,
    ) -> Result<Vec<CurveHandle>, HostError> {
        self.begin(HostCall::Offset)?;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(HostError::OffsetFailed {
                reason: format!("offset distance {distance}"),
            });
        }
        if curves.is_empty() {
            return Err(HostError::OffsetFailed {
                reason: "no curves to offset".to_string(),
            });
        }
        self.check_point(&direction_point)?;

        let record = self
            .sketches
            .get(&sketch)
            .ok_or_else(|| HostError::not_found(sketch))?;
        let mut created = Vec::with_capacity(curves.len());
        for handle in curves {
            let curve = record
                .curves
                .iter()
                .find(|c| c.handle == *handle)
                .ok_or_else(|| HostError::not_found(handle))?;
            created.push(self.offset_geometry(curve, direction_point, distance)?);
        }

        created
            .into_iter()
            .map(|geometry| self.push_curve(sketch, geometry))
            .collect()
    }

    fn profiles(&mut self, sketch: SketchHandle) -> Result<Vec<Profile>, HostError> {
        self.begin(HostCall::Profiles)?;
        let record = self.sketch_mut(sketch)?;
        record.issued = Some(record.revision);
        let regions = self.regions(sketch)?;
        Ok(regions
            .iter()
            .enumerate()
            .map(|(i, r)| Profile {
                id: ProfileId(i as u32),
                curves: r.sources.clone(),
                loop_count: r.loops.len(),
                area: r.area,
                centroid: Point3::planar(r.centroid[0], r.centroid[1]),
            })
            .collect())
    }

    fn revolve(
        &mut self,
        component: ComponentHandle,
        input: &RevolveInput,
    ) -> Result<BodyHandle, HostError> {
        self.begin(HostCall::Revolve)?;
        if input.operation != FeatureOperation::NewBody {
            return Err(HostError::NotSupported {
                operation: format!("revolve with {:?}", input.operation),
            });
        }
        if !input.angle.is_finite() || input.angle <= 0.0 || input.angle > TAU + 1e-12 {
            return Err(HostError::RevolveFailed {
                reason: format!("angle {} outside (0, 2π]", input.angle),
            });
        }
        if !self.has_component(component) {
            return Err(HostError::not_found(component));
        }
        if input.profiles.is_empty() {
            return Err(HostError::RevolveFailed {
                reason: "no profiles selected".to_string(),
            });
        }
        let mut unique = input.profiles.clone();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() != input.profiles.len() {
            return Err(HostError::RevolveFailed {
                reason: "profile selected twice".to_string(),
            });
        }

        let tol = self.tolerance.weld;
        let record = self
            .sketches
            .get(&input.sketch)
            .ok_or_else(|| HostError::not_found(input.sketch))?;
        if record.component != component {
            return Err(HostError::RevolveFailed {
                reason: format!("{} belongs to another component", input.sketch),
            });
        }
        if record.issued != Some(record.revision) {
            return Err(HostError::RevolveFailed {
                reason: format!("profile ids of {} are stale", input.sketch),
            });
        }
        let axis = match record.curves.iter().find(|c| c.handle == input.axis) {
            Some(SketchCurve {
                geometry: CurveGeometry::Line { start, end },
                ..
            }) => [*start, *end],
            Some(_) => {
                return Err(HostError::RevolveFailed {
                    reason: format!("axis {} is not a line", input.axis),
                })
            }
            None => return Err(HostError::not_found(input.axis)),
        };
        let (a, b) = ([axis[0].x, axis[0].y], [axis[1].x, axis[1].y]);

        let angle = input.angle;
        let regions = self.regions(input.sketch)?;
        let mut volume = 0.0;
        for id in &input.profiles {
            let region = regions
                .get(id.0 as usize)
                .ok_or_else(|| HostError::not_found(id))?;
            let (lo, hi) = region
                .outlines
                .iter()
                .flatten()
                .map(|p| regions::signed_distance(*p, a, b))
                .fold((f64::MAX, f64::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)));
            if lo < -tol && hi > tol {
                return Err(HostError::RevolveFailed {
                    reason: format!("{id} crosses the revolve axis"),
                });
            }
            volume += angle * region.area * regions::signed_distance(region.centroid, a, b).abs();
        }

        let handle = BodyHandle(Uuid::new_v4());
        self.bodies.push(Body {
            handle,
            component,
            sketch: input.sketch,
            profiles: input.profiles.clone(),
            axis,
            angle,
            operation: input.operation,
            volume,
        });
        debug!(%handle, profiles = input.profiles.len(), volume, "revolved body");
        Ok(handle)
    }

    fn delete_body(&mut self, body: BodyHandle) -> Result<(), HostError> {
        self.begin(HostCall::DeleteBody)?;
        let idx = self
            .bodies
            .iter()
            .position(|b| b.handle == body)
            .ok_or_else(|| HostError::not_found(body))?;
        self.bodies.remove(idx);
        Ok(())
    }

    fn delete_sketch(&mut self, sketch: SketchHandle) -> Result<(), HostError> {
        self.begin(HostCall::DeleteSketch)?;
        self.sketches
            .remove(&sketch)
            .map(|_| ())
            .ok_or_else(|| HostError::not_found(sketch))
    }

    fn delete_component(&mut self, component: ComponentHandle) -> Result<(), HostError> {
        self.begin(HostCall::DeleteComponent)?;
        let idx = self
            .components
            .iter()
            .position(|c| c.handle == component)
            .ok_or_else(|| HostError::not_found(component))?;
        self.components.remove(idx);
        self.sketches.retain(|_, s| s.component != component);
        self.bodies.retain(|b| b.component != component);
        Ok(())
    }

    fn report_failure(&mut self, message: &str) {
        warn!(failure = message, "host failure reported");
        self.messages.push(message.to_string());
    }
}
