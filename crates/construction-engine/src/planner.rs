//! Construction planning: walks the ordered feature list, threads the
//! running solid, batches deferred cuts, and performs the final fuse-and-cut.

use geom_kernel::{GeometryKernel, SolidHandle};
use part_types::{Feature, FeatureOp, PartDefinition, Shape};

use crate::bevel::apply_beveled_edge;
use crate::error::EngineError;
use crate::primitives::{build_cube, build_hole_feature, build_nut, build_sphere};

/// Ephemeral state of one part build: the running solid plus the
/// not-yet-applied subtractive solids. Discarded after one build.
#[derive(Debug, Default)]
struct ConstructionPlan {
    solid: Option<SolidHandle>,
    cut_batch: Vec<SolidHandle>,
}

impl ConstructionPlan {
    /// Apply one feature, returning the updated plan.
    fn apply(
        mut self,
        kernel: &mut dyn GeometryKernel,
        feature: &Feature,
    ) -> Result<Self, EngineError> {
        match feature.op {
            FeatureOp::Add => match &feature.shape {
                // A later additive cube replaces the running solid wholesale;
                // exactly one running solid exists at a time.
                Shape::Cube(cube) => self.solid = Some(build_cube(kernel, cube)?),
                other => {
                    return Err(EngineError::UnsupportedAdditive { name: other.name() });
                }
            },
            FeatureOp::Cut => {
                let base = self.solid.clone().ok_or(EngineError::MissingBaseSolid)?;
                match &feature.shape {
                    // Deferred: fused and cut once at the end of the pass.
                    Shape::Hole(hole) => self.cut_batch.push(build_hole_feature(kernel, hole)?),
                    Shape::Cube(cube) => self.cut_batch.push(build_cube(kernel, cube)?),
                    Shape::Nut(nut) => self.cut_batch.push(build_nut(kernel, nut)?),
                    // Curved subtractive geometry in a large fused boolean
                    // tree tends to break the kernel; spheres cut immediately.
                    Shape::Sphere(sphere) => {
                        let tool = build_sphere(kernel, sphere)?;
                        self.solid = Some(kernel.cut(&base, &tool)?);
                    }
                    // Bevels replace the solid immediately, never batched.
                    Shape::BeveledEdge(bevel) => {
                        self.solid = Some(apply_beveled_edge(kernel, bevel, &base)?);
                    }
                }
            }
        }
        Ok(self)
    }

    /// Consume the batch: one fused cut for many tools, a direct cut for
    /// one, the running solid unchanged for none.
    fn finalize(self, kernel: &mut dyn GeometryKernel) -> Result<SolidHandle, EngineError> {
        let solid = self.solid.ok_or(EngineError::MissingBaseSolid)?;
        match self.cut_batch.len() {
            0 => Ok(solid),
            1 => Ok(kernel.cut(&solid, &self.cut_batch[0])?),
            _ => {
                let fused = kernel.multi_fuse(&self.cut_batch)?;
                Ok(kernel.cut(&solid, &fused)?)
            }
        }
    }
}

/// Build the finished solid for a part definition.
///
/// The feature list must be non-empty and start with an additive feature;
/// any modeling error aborts the build.
pub fn construct_part(
    kernel: &mut dyn GeometryKernel,
    definition: &PartDefinition,
) -> Result<SolidHandle, EngineError> {
    let mut features = definition.features.iter();
    let first = features.next().ok_or(EngineError::EmptyDefinition)?;
    if first.op != FeatureOp::Add {
        return Err(EngineError::MissingBaseSolid);
    }

    let mut plan = ConstructionPlan::default().apply(kernel, first)?;
    for feature in features {
        plan = plan.apply(kernel, feature)?;
    }
    plan.finalize(kernel)
}
