pub mod object3d;
pub mod scene;
pub mod scene_model;
pub mod transform;

pub use object3d::{Object3D, ObjectId, RestPose};
pub use scene::Scene;
pub use scene_model::{SceneModel, SceneModelId};
pub use transform::Transform;
