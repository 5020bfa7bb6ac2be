use crate::types::*;

/// The object-creation API of a CAD host application.
///
/// Every call blocks until the host has applied it to the active document.
/// Implemented by MemoryHost (in-process reference document) and by adapters
/// for real host applications.
pub trait ModelingHost {
    /// Create a new component occurrence in the root component.
    fn add_component(&mut self) -> Result<ComponentHandle, HostError>;

    /// Rename a component.
    fn set_component_name(
        &mut self,
        component: ComponentHandle,
        name: &str,
    ) -> Result<(), HostError>;

    /// Look up one of a component's origin construction planes.
    fn construction_plane(
        &self,
        component: ComponentHandle,
        plane: ConstructionPlane,
    ) -> Result<PlaneHandle, HostError>;

    /// Create an empty sketch on a construction plane.
    fn add_sketch(
        &mut self,
        component: ComponentHandle,
        plane: PlaneHandle,
    ) -> Result<SketchHandle, HostError>;

    /// Add a line segment between two sketch points.
    fn add_line(
        &mut self,
        sketch: SketchHandle,
        start: Point3,
        end: Point3,
    ) -> Result<CurveHandle, HostError>;

    /// Add an axis-aligned rectangle from two opposite corners.
    ///
    /// Returns the four edges in drawing order: the edge through the first
    /// corner along x, the edge through the second corner along y, the edge
    /// through the second corner along x, and the edge through the first
    /// corner along y.
    fn add_two_point_rectangle(
        &mut self,
        sketch: SketchHandle,
        first: Point3,
        second: Point3,
    ) -> Result<[CurveHandle; 4], HostError>;

    /// Add a full circle.
    fn add_circle(
        &mut self,
        sketch: SketchHandle,
        center: Point3,
        radius: f64,
    ) -> Result<CurveHandle, HostError>;

    /// Offset curves by `distance` toward the side `direction_point` lies on.
    /// Returns the newly created curves in input order.
    fn offset(
        &mut self,
        sketch: SketchHandle,
        curves: &[CurveHandle],
        direction_point: Point3,
        distance: f64,
    ) -> Result<Vec<CurveHandle>, HostError>;

    /// Enumerate the closed regions of a sketch. Order is unspecified.
    fn profiles(&mut self, sketch: SketchHandle) -> Result<Vec<Profile>, HostError>;

    /// Create a revolve feature in `component`.
    fn revolve(
        &mut self,
        component: ComponentHandle,
        input: &RevolveInput,
    ) -> Result<BodyHandle, HostError>;

    /// Remove a body from the document.
    fn delete_body(&mut self, body: BodyHandle) -> Result<(), HostError>;

    /// Remove a sketch and its curves from the document.
    fn delete_sketch(&mut self, sketch: SketchHandle) -> Result<(), HostError>;

    /// Remove a component and everything it owns.
    fn delete_component(&mut self, component: ComponentHandle) -> Result<(), HostError>;

    /// Show a failure message to the user.
    fn report_failure(&mut self, message: &str);
}
