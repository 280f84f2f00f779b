use na::{Isometry3, Matrix3, Matrix4, Matrix6x3, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::{spatial::algebra::{adjoint, is_valid_transform}, types::Float};

/// Elemental rotation axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Order in which the three elemental rotations compose into the joint
/// rotation. Coordinate i rotates about `axes()[i]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrder {
    /// R = Rx(q0) * Ry(q1) * Rz(q2)
    XYZ,
    /// R = Rz(q0) * Ry(q1) * Rx(q2)
    ZYX,
}

impl AxisOrder {
    pub fn axes(&self) -> [Axis; 3] {
        match self {
            AxisOrder::XYZ => [Axis::X, Axis::Y, Axis::Z],
            AxisOrder::ZYX => [Axis::Z, Axis::Y, Axis::X],
        }
    }
}

#[rustfmt::skip]
pub fn rot_x(angle: Float) -> Matrix3<Float> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1., 0., 0.,
        0.,  c, -s,
        0.,  s,  c,
    )
}

#[rustfmt::skip]
pub fn rot_y(angle: Float) -> Matrix3<Float> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
         c, 0.,  s,
        0., 1., 0.,
        -s, 0.,  c,
    )
}

#[rustfmt::skip]
pub fn rot_z(angle: Float) -> Matrix3<Float> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
         c, -s, 0.,
         s,  c, 0.,
        0., 0., 1.,
    )
}

pub fn elemental_rotation(axis: Axis, angle: Float) -> Matrix3<Float> {
    match axis {
        Axis::X => rot_x(angle),
        Axis::Y => rot_y(angle),
        Axis::Z => rot_z(angle),
    }
}

/// d/dθ of the elemental rotation about axis, evaluated at angle
#[rustfmt::skip]
pub fn elemental_rotation_derivative(axis: Axis, angle: Float) -> Matrix3<Float> {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            0., 0., 0.,
            0., -s, -c,
            0.,  c, -s,
        ),
        Axis::Y => Matrix3::new(
            -s, 0.,  c,
            0., 0., 0.,
            -c, 0., -s,
        ),
        Axis::Z => Matrix3::new(
            -s, -c, 0.,
             c, -s, 0.,
            0., 0., 0.,
        ),
    }
}

/// Net rotation of the three elemental rotations, composed in axis order
pub fn euler_to_matrix(order: AxisOrder, q: &Vector3<Float>) -> Matrix3<Float> {
    let axes = order.axes();
    elemental_rotation(axes[0], q[0])
        * elemental_rotation(axes[1], q[1])
        * elemental_rotation(axes[2], q[2])
}

/// Jacobian of the joint rotation in the joint's own (child side) frame.
/// Only q1 and q2 appear.
#[rustfmt::skip]
pub fn euler_jacobian(order: AxisOrder, q: &Vector3<Float>) -> Matrix6x3<Float> {
    let (s1, c1) = q[1].sin_cos();
    let (s2, c2) = q[2].sin_cos();

    match order {
        AxisOrder::XYZ => Matrix6x3::new(
             c1 * c2,  s2, 0.,
            -c1 * s2,  c2, 0.,
                  s1,  0., 1.,
                  0.,  0., 0.,
                  0.,  0., 0.,
                  0.,  0., 0.,
        ),
        AxisOrder::ZYX => Matrix6x3::new(
                 -s1,  0., 1.,
             s2 * c1,  c2, 0.,
             c1 * c2, -s2, 0.,
                  0.,  0., 0.,
                  0.,  0., 0.,
                  0.,  0., 0.,
        ),
    }
}

/// Time derivative of `euler_jacobian`. dq0 never appears.
#[rustfmt::skip]
pub fn euler_jacobian_time_deriv(
    order: AxisOrder,
    q: &Vector3<Float>,
    dq: &Vector3<Float>,
) -> Matrix6x3<Float> {
    let (s1, c1) = q[1].sin_cos();
    let (s2, c2) = q[2].sin_cos();
    let dq1 = dq[1];
    let dq2 = dq[2];

    match order {
        AxisOrder::XYZ => Matrix6x3::new(
            -(dq1 * c2 * s1) - dq2 * c1 * s2,    dq2 * c2, 0.,
            -(dq2 * c1 * c2) + dq1 * s1 * s2, -(dq2 * s2), 0.,
                                    dq1 * c1,          0., 0.,
                                          0.,          0., 0.,
                                          0.,          0., 0.,
                                          0.,          0., 0.,
        ),
        AxisOrder::ZYX => Matrix6x3::new(
                                -c1 * dq1,       0., 0.,
             c2 * c1 * dq2 - s2 * s1 * dq1, -s2 * dq2, 0.,
            -s1 * c2 * dq1 - c1 * s2 * dq2, -c2 * dq2, 0.,
                                       0.,        0., 0.,
                                       0.,        0., 0.,
                                       0.,        0., 0.,
        ),
    }
}

fn rotation_to_isometry(R: &Matrix3<Float>) -> Isometry3<Float> {
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*R));
    Isometry3::from_parts(Translation3::identity(), rotation)
}

fn embed_rotation(R: &Matrix3<Float>) -> Matrix4<Float> {
    let mut mat = Matrix4::zeros();
    mat.fixed_view_mut::<3, 3>(0, 0).copy_from(R);
    mat
}

/// A 3-DOF rotational joint parameterized by Euler angles.
///
/// The local transform maps the child body frame into the parent body frame:
///     T = parent_to_joint * R(q) * child_to_joint^-1
pub struct EulerJoint {
    axis_order: AxisOrder,
    pub parent_to_joint: Isometry3<Float>,
    pub child_to_joint: Isometry3<Float>,

    pub q: Vector3<Float>, // joint angles (rad)
    pub v: Vector3<Float>, // joint angle rates
    pub damping: Vector3<Float>,

    transform: Isometry3<Float>,
    jacobian: Matrix6x3<Float>,
    jacobian_deriv: Matrix6x3<Float>,
}

impl Default for EulerJoint {
    fn default() -> Self {
        EulerJoint::new(AxisOrder::XYZ, Isometry3::identity(), Isometry3::identity())
    }
}

impl EulerJoint {
    pub fn new(
        axis_order: AxisOrder,
        parent_to_joint: Isometry3<Float>,
        child_to_joint: Isometry3<Float>,
    ) -> Self {
        EulerJoint {
            axis_order,
            parent_to_joint,
            child_to_joint,
            q: Vector3::zeros(),
            v: Vector3::zeros(),
            damping: Vector3::zeros(),
            transform: parent_to_joint * child_to_joint.inverse(),
            jacobian: Matrix6x3::zeros(),
            jacobian_deriv: Matrix6x3::zeros(),
        }
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn transform(&self) -> &Isometry3<Float> {
        &self.transform
    }

    pub fn jacobian(&self) -> &Matrix6x3<Float> {
        &self.jacobian
    }

    pub fn jacobian_deriv(&self) -> &Matrix6x3<Float> {
        &self.jacobian_deriv
    }

    /// Set joint angles and rates, then recompute transform, Jacobian and
    /// Jacobian time derivative
    pub fn update(&mut self, q: Vector3<Float>, v: Vector3<Float>) {
        self.q = q;
        self.v = v;
        self.update_transform();
        self.update_jacobian();
        self.update_jacobian_time_deriv();
    }

    /// Viscous damping forces, -damping ⊙ v
    pub fn damping_forces(&self) -> Vector3<Float> {
        -self.damping.component_mul(&self.v)
    }

    /// Rotation produced by coordinate `index` alone, others held at zero
    pub fn elemental_transform(&self, index: usize) -> Isometry3<Float> {
        assert!(index < 3, "Euler joint coordinate index {} out of range", index);
        let mut q = Vector3::zeros();
        q[index] = self.q[index];
        rotation_to_isometry(&euler_to_matrix(self.axis_order, &q))
    }

    /// Derivative of coordinate `index`'s elemental rotation with respect to
    /// that coordinate, in the upper-left block of an otherwise zero matrix
    pub fn elemental_transform_derivative(&self, index: usize) -> Matrix4<Float> {
        assert!(index < 3, "Euler joint coordinate index {} out of range", index);
        let axis = self.axis_order.axes()[index];
        embed_rotation(&elemental_rotation_derivative(axis, self.q[index]))
    }

    /// Partial derivative of the full local transform with respect to
    /// coordinate `index`
    pub fn local_transform_derivative(&self, index: usize) -> Matrix4<Float> {
        assert!(index < 3, "Euler joint coordinate index {} out of range", index);
        let axes = self.axis_order.axes();
        let factor = |i: usize| {
            if i == index {
                elemental_rotation_derivative(axes[i], self.q[i])
            } else {
                elemental_rotation(axes[i], self.q[i])
            }
        };
        let dR = factor(0) * factor(1) * factor(2);

        self.parent_to_joint.to_homogeneous()
            * embed_rotation(&dR)
            * self.child_to_joint.inverse().to_homogeneous()
    }

    pub fn update_transform(&mut self) -> &Isometry3<Float> {
        let R = euler_to_matrix(self.axis_order, &self.q);
        self.transform =
            self.parent_to_joint * rotation_to_isometry(&R) * self.child_to_joint.inverse();

        debug_assert!(
            is_valid_transform(&self.transform.to_homogeneous()),
            "Euler joint produced an invalid rigid transform"
        );
        &self.transform
    }

    pub fn update_jacobian(&mut self) -> &Matrix6x3<Float> {
        self.jacobian = adjoint(&self.child_to_joint) * euler_jacobian(self.axis_order, &self.q);
        &self.jacobian
    }

    pub fn update_jacobian_time_deriv(&mut self) -> &Matrix6x3<Float> {
        self.jacobian_deriv = adjoint(&self.child_to_joint)
            * euler_jacobian_time_deriv(self.axis_order, &self.q, &self.v);
        &self.jacobian_deriv
    }
}
