//! TruckKernel — real geometry kernel wrapping truck's sweep and shapeops API.

use std::collections::HashMap;
use std::f64::consts::PI;

use part_types::{PlacementTransform, Rotation};
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Solid, Vertex, Wire};
use truck_modeling::{EuclideanSpace, Point3, Rad, Vector3};

use crate::tessellation;
use crate::traits::GeometryKernel;
use crate::types::{FaceHandle, KernelError, SolidHandle, TriangleMesh};

/// Tolerance handed to truck's boolean operations.
const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_face: u64,
    solids: HashMap<u64, Solid>,
    /// Standalone faces created by make_polygon_face, awaiting extrude.
    standalone_faces: HashMap<u64, Face>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_face: 1,
            solids: HashMap::new(),
            standalone_faces: HashMap::new(),
        }
    }

    fn store_solid(&mut self, solid: Solid) -> SolidHandle {
        let handle = SolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn get_solid(&self, handle: &SolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::UnknownSolid {
                handle: handle.id(),
            })
    }

    fn apply_rotation(solid: Solid, rotation: &Rotation) -> Solid {
        if rotation.angle_deg == 0.0 {
            return solid;
        }
        let [ax, ay, az] = rotation.axis.unit();
        builder::rotated(
            &solid,
            Point3::origin(),
            Vector3::new(ax, ay, az),
            Rad(rotation.angle_deg.to_radians()),
        )
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryKernel for TruckKernel {
    fn make_box(
        &mut self,
        extents: [f64; 3],
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let [w, h, d] = extents;
        if w <= 0.0 || h <= 0.0 || d <= 0.0 {
            return Err(KernelError::InvalidGeometry {
                reason: format!("box extents must be positive, got {w} x {h} x {d}"),
            });
        }
        // truck has no built-in box; successive translational sweeps.
        let v = builder::vertex(Point3::new(origin[0], origin[1], origin[2]));
        let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
        let face = builder::tsweep(&edge, Vector3::new(0.0, h, 0.0));
        let solid = builder::tsweep(&face, Vector3::new(0.0, 0.0, d));
        Ok(self.store_solid(solid))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        depth: f64,
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        if radius <= 0.0 || depth <= 0.0 {
            return Err(KernelError::InvalidGeometry {
                reason: format!("cylinder needs positive radius and depth, got r={radius} d={depth}"),
            });
        }
        let center = Point3::new(origin[0], origin[1], origin[2]);
        let start = builder::vertex(Point3::new(origin[0] + radius, origin[1], origin[2]));
        let circle: Wire = builder::rsweep(&start, center, Vector3::unit_z(), Rad(2.0 * PI));
        let face = builder::try_attach_plane(&[circle]).map_err(|e| {
            KernelError::InvalidGeometry {
                reason: format!("failed to attach circular face: {e:?}"),
            }
        })?;
        let solid = builder::tsweep(&face, Vector3::new(0.0, 0.0, depth));
        Ok(self.store_solid(solid))
    }

    fn make_sphere(
        &mut self,
        radius: f64,
        center: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        if radius <= 0.0 {
            return Err(KernelError::InvalidGeometry {
                reason: format!("sphere radius must be positive, got {radius}"),
            });
        }
        // Semicircle face in the XZ plane, revolved a full turn about Z.
        let v_right = builder::vertex(Point3::new(radius, 0.0, 0.0));
        let arc: Wire = builder::rsweep(&v_right, Point3::origin(), Vector3::unit_y(), Rad(PI));

        let v_left = builder::vertex(Point3::new(-radius, 0.0, 0.0));
        let closing: Edge = builder::tsweep(&v_left, Vector3::new(2.0 * radius, 0.0, 0.0));

        let mut edges: Vec<Edge> = arc.edge_iter().cloned().collect();
        edges.push(closing);
        let half_disc = builder::try_attach_plane(&[Wire::from_iter(edges)]).map_err(|e| {
            KernelError::InvalidGeometry {
                reason: format!("failed to attach semicircle face: {e:?}"),
            }
        })?;

        let solid = builder::rsweep(&half_disc, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI));
        let solid = if center == [0.0, 0.0, 0.0] {
            solid
        } else {
            builder::translated(&solid, Vector3::new(center[0], center[1], center[2]))
        };
        Ok(self.store_solid(solid))
    }

    fn make_polygon_face(&mut self, vertices: &[[f64; 3]]) -> Result<FaceHandle, KernelError> {
        if vertices.len() < 4 || vertices.first() != vertices.last() {
            return Err(KernelError::InvalidGeometry {
                reason: "polygon loop must be closed with at least 3 distinct vertices".to_string(),
            });
        }
        let points: Vec<Vertex> = vertices[..vertices.len() - 1]
            .iter()
            .map(|p| builder::vertex(Point3::new(p[0], p[1], p[2])))
            .collect();

        let mut edges = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            edges.push(builder::line(&points[i], &points[(i + 1) % points.len()]));
        }
        let wire = Wire::from_iter(edges);
        let face = builder::try_attach_plane(&[wire]).map_err(|e| {
            KernelError::InvalidGeometry {
                reason: format!("failed to attach polygon face: {e:?}"),
            }
        })?;

        let handle = FaceHandle(self.next_face);
        self.next_face += 1;
        self.standalone_faces.insert(handle.0, face);
        Ok(handle)
    }

    fn extrude(
        &mut self,
        face: FaceHandle,
        vector: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let truck_face = self
            .standalone_faces
            .remove(&face.0)
            .ok_or(KernelError::UnknownFace { handle: face.0 })?;
        let solid = builder::tsweep(
            &truck_face,
            Vector3::new(vector[0], vector[1], vector[2]),
        );
        Ok(self.store_solid(solid))
    }

    fn set_placement(
        &mut self,
        solid: &SolidHandle,
        placement: &PlacementTransform,
    ) -> Result<(), KernelError> {
        let mut shape = self.get_solid(solid)?.clone();
        if let Some(orient) = &placement.orient {
            shape = Self::apply_rotation(shape, orient);
        }
        if let Some(align) = &placement.align {
            shape = Self::apply_rotation(shape, align);
        }
        let [tx, ty, tz] = placement.translation;
        if [tx, ty, tz] != [0.0, 0.0, 0.0] {
            shape = builder::translated(&shape, Vector3::new(tx, ty, tz));
        }
        self.solids.insert(solid.id(), shape);
        Ok(())
    }

    fn cut(&mut self, base: &SolidHandle, tool: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get_solid(base)?.clone();
        let mut solid_b = self.get_solid(tool)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result = truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(
            || KernelError::BooleanFailed {
                reason: "truck and() returned None for subtraction".to_string(),
            },
        )?;
        Ok(self.store_solid(result))
    }

    fn multi_fuse(&mut self, solids: &[SolidHandle]) -> Result<SolidHandle, KernelError> {
        let mut handles = solids.iter();
        let first = handles.next().ok_or(KernelError::InvalidGeometry {
            reason: "cannot fuse an empty solid list".to_string(),
        })?;
        let mut fused = self.get_solid(first)?.clone();
        for handle in handles {
            let next = self.get_solid(handle)?;
            fused = truck_shapeops::or(&fused, next, BOOLEAN_TOLERANCE).ok_or_else(|| {
                KernelError::BooleanFailed {
                    reason: "truck or() returned None".to_string(),
                }
            })?;
        }
        Ok(self.store_solid(fused))
    }

    fn intersect(
        &mut self,
        a: &SolidHandle,
        b: &SolidHandle,
    ) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?.clone();
        let solid_b = self.get_solid(b)?.clone();
        let result = truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(
            || KernelError::BooleanFailed {
                reason: "truck and() returned None".to_string(),
            },
        )?;
        Ok(self.store_solid(result))
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<TriangleMesh, KernelError> {
        let shape = self.get_solid(solid)?;
        tessellation::tessellate_solid(shape, tolerance)
    }
}
