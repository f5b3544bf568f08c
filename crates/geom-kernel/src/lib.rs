pub mod mock_kernel;
pub mod traits;
pub mod truck_kernel;
pub mod types;

mod tessellation;

pub use mock_kernel::{KernelOp, MockKernel, ShapeRecord};
pub use traits::GeometryKernel;
pub use truck_kernel::TruckKernel;
pub use types::{FaceHandle, KernelError, SolidHandle, TriangleMesh};
