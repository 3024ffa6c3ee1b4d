//! Camera descriptors. A camera is either parameterized (position plus
//! orientation basis and lens values, with the runtime deriving the
//! matrices) or driven by explicit view/projection matrices.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector3};

use crate::ffi::records::{CameraInfo, CameraInfoParameterizedExt};
use crate::ffi::StructType;
use crate::math::Float3;

/// Which camera slot the runtime updates.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraType {
    #[default]
    World = 0,
    Sky = 1,
    ViewModel = 2,
}

/// How the camera's matrices come about.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraProjection {
    /// The runtime derives view and projection from these values.
    Parameterized {
        position: Float3,
        forward: Float3,
        up: Float3,
        right: Float3,
        fov_y: f32,
        aspect: f32,
        near_plane: f32,
        far_plane: f32,
    },
    /// Row-major view and projection matrices supplied verbatim.
    Matrices {
        view: [[f32; 4]; 4],
        projection: [[f32; 4]; 4],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub camera_type: CameraType,
    pub projection: CameraProjection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            camera_type: CameraType::World,
            projection: CameraProjection::Parameterized {
                position: Float3::new(0.0, 0.0, 0.0),
                forward: Float3::new(0.0, 0.0, 1.0),
                up: Float3::new(0.0, 1.0, 0.0),
                right: Float3::new(1.0, 0.0, 0.0),
                fov_y: 70.0,
                aspect: 16.0 / 9.0,
                near_plane: 0.1,
                far_plane: 1000.0,
            },
        }
    }
}

impl Camera {
    /// World camera at `position` looking towards `target`, with the basis
    /// re-orthogonalized around the given up hint.
    pub fn look_at(position: Float3, target: Float3, up: Float3, fov_y: f32, aspect: f32) -> Self {
        let eye = Vector3::from(position);
        let forward = (Vector3::from(target) - eye).normalize();
        let right = Vector3::from(up).cross(forward).normalize();
        let true_up = forward.cross(right);
        Self {
            camera_type: CameraType::World,
            projection: CameraProjection::Parameterized {
                position,
                forward: forward.into(),
                up: true_up.into(),
                right: right.into(),
                fov_y,
                aspect,
                near_plane: 0.1,
                far_plane: 1000.0,
            },
        }
    }

    /// Camera driven by explicit cgmath matrices.
    pub fn from_matrices(
        camera_type: CameraType,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
    ) -> Self {
        Self {
            camera_type,
            projection: CameraProjection::Matrices {
                view: row_major(view),
                projection: row_major(projection),
            },
        }
    }

    /// Bakes the camera record. In parameterized mode the head matrices are
    /// zeroed and the extension carries the lens values instead.
    pub fn to_raw(&self) -> RawCamera {
        match &self.projection {
            CameraProjection::Parameterized {
                position,
                forward,
                up,
                right,
                fov_y,
                aspect,
                near_plane,
                far_plane,
            } => {
                let params = Box::new(CameraInfoParameterizedExt {
                    s_type: StructType::CameraInfoParameterizedExt,
                    p_next: std::ptr::null(),
                    position: *position,
                    forward: *forward,
                    up: *up,
                    right: *right,
                    fov_y_in_degrees: *fov_y,
                    aspect: *aspect,
                    near_plane: *near_plane,
                    far_plane: *far_plane,
                });
                let head = CameraInfo {
                    s_type: StructType::CameraInfo,
                    p_next: &*params as *const _ as *const std::ffi::c_void,
                    camera_type: self.camera_type as i32,
                    view: [[0.0; 4]; 4],
                    projection: [[0.0; 4]; 4],
                };
                RawCamera {
                    head,
                    params: Some(params),
                }
            }
            CameraProjection::Matrices { view, projection } => RawCamera {
                head: CameraInfo {
                    s_type: StructType::CameraInfo,
                    p_next: std::ptr::null(),
                    camera_type: self.camera_type as i32,
                    view: *view,
                    projection: *projection,
                },
                params: None,
            },
        }
    }
}

// cgmath stores column-major; the wire format wants row-major.
fn row_major(m: Matrix4<f32>) -> [[f32; 4]; 4] {
    let t = m.transpose();
    [t.x.into(), t.y.into(), t.z.into(), t.w.into()]
}

/// Camera look-at view matrix built with cgmath, for the matrix-driven path.
pub fn view_matrix(eye: Float3, target: Float3, up: Float3) -> Matrix4<f32> {
    Matrix4::look_at_rh(
        Point3::new(eye.x, eye.y, eye.z),
        Point3::new(target.x, target.y, target.z),
        Vector3::from(up),
    )
}

/// Baked camera record, plus the parameterized extension when present.
/// Valid only while this value is alive.
#[derive(Debug)]
pub struct RawCamera {
    head: CameraInfo,
    params: Option<Box<CameraInfoParameterizedExt>>,
}

impl RawCamera {
    pub fn head(&self) -> &CameraInfo {
        &self.head
    }

    pub fn parameterized_ext(&self) -> Option<&CameraInfoParameterizedExt> {
        self.params.as_deref()
    }
}
