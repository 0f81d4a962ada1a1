//! Gate matrices: compile-time constants and parameterized generators

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Identity
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// Hadamard
/// H = 1/√2 · [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X (NOT)
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y
pub const PAULI_Y: [[Complex64; 2]; 2] = [
    [ZERO, Complex64::new(0.0, -1.0)],
    [I, ZERO],
];

/// Pauli-Z
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// √X
/// SX = ½ · [[1+i, 1-i],
///           [1-i, 1+i]]
pub const SQRT_X: [[Complex64; 2]; 2] = [
    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
];

// Two-qubit matrices use the block order (q1=0,q2=0), (q1=0,q2=1),
// (q1=1,q2=0), (q1=1,q2=1): the first qubit is the high bit of the block
// index.

/// CNOT with the first qubit as control
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

/// Controlled-Z
pub const CZ: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ZERO, NEG_ONE],
];

/// SWAP
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// iSWAP: swaps |01⟩ and |10⟩ with a factor i
pub const ISWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, I, ZERO],
    [ZERO, I, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_x(theta: f64) -> [[Complex64; 2]; 2] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
        [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_y(theta: f64) -> [[Complex64; 2]; 2] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
        [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
    ]
}

/// RZ(θ) = [[e^(-iθ/2), 0],
///          [0,          e^(iθ/2)]]
#[inline]
pub fn rotation_z(theta: f64) -> [[Complex64; 2]; 2] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, -sin), ZERO],
        [ZERO, Complex64::new(cos, sin)],
    ]
}

/// Rotation about the axis at angle φ in the XY plane, by a fixed 90°
///
/// RPhi90(φ) = 1/√2 · [[1,           -i·e^(-iφ)],
///                     [-i·e^(iφ),    1]]
#[inline]
pub fn rphi90(phi: f64) -> [[Complex64; 2]; 2] {
    let (sin, cos) = phi.sin_cos();
    [
        [
            Complex64::new(INV_SQRT2, 0.0),
            Complex64::new(-sin, -cos) * INV_SQRT2,
        ],
        [
            Complex64::new(sin, -cos) * INV_SQRT2,
            Complex64::new(INV_SQRT2, 0.0),
        ],
    ]
}

/// Rotation about the axis at angle φ in the XY plane, by a fixed 180°
///
/// RPhi180(φ) = [[0,         -i·e^(-iφ)],
///               [-i·e^(iφ),  0]]
#[inline]
pub fn rphi180(phi: f64) -> [[Complex64; 2]; 2] {
    let (sin, cos) = phi.sin_cos();
    [
        [ZERO, Complex64::new(-sin, -cos)],
        [Complex64::new(sin, -cos), ZERO],
    ]
}

/// Rotation about the axis at angle φ in the XY plane, by angle θ
///
/// RPhi(φ, θ) = [[cos(θ/2),            -i·e^(-iφ)·sin(θ/2)],
///               [-i·e^(iφ)·sin(θ/2),   cos(θ/2)]]
#[inline]
pub fn rphi(phi: f64, theta: f64) -> [[Complex64; 2]; 2] {
    let (sin_half, cos_half) = (theta / 2.0).sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    [
        [
            Complex64::new(cos_half, 0.0),
            Complex64::new(-sin_phi, -cos_phi) * sin_half,
        ],
        [
            Complex64::new(sin_phi, -cos_phi) * sin_half,
            Complex64::new(cos_half, 0.0),
        ],
    ]
}

/// Partial iSWAP interaction
///
/// XY(θ) = [[1, 0,            0,           0],
///          [0, cos(θ/2),    -i·sin(θ/2),  0],
///          [0, -i·sin(θ/2),  cos(θ/2),    0],
///          [0, 0,            0,           1]]
#[inline]
pub fn xy(theta: f64) -> [[Complex64; 4]; 4] {
    let (sin, cos) = (theta / 2.0).sin_cos();
    let c = Complex64::new(cos, 0.0);
    let s = Complex64::new(0.0, -sin);
    [
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, c, s, ZERO],
        [ZERO, s, c, ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ]
}

/// Arbitrary single-qubit unitary from eight reals
///
/// The parameters are the four matrix entries in row-major order, each as
/// a (re, im) pair, the layout an opcode's parameter list carries.
#[inline]
pub fn u22(params: &[f64]) -> [[Complex64; 2]; 2] {
    debug_assert_eq!(params.len(), 8);
    [
        [
            Complex64::new(params[0], params[1]),
            Complex64::new(params[2], params[3]),
        ],
        [
            Complex64::new(params[4], params[5]),
            Complex64::new(params[6], params[7]),
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mat_mul_2(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) -> [[Complex64; 2]; 2] {
        let mut out = [[ZERO; 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    out[i][j] += a[i][k] * b[k][j];
                }
            }
        }
        out
    }

    fn assert_mat_eq_2(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(a[i][j].re, b[i][j].re, epsilon = 1e-12);
                assert_relative_eq!(a[i][j].im, b[i][j].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_hadamard_self_inverse() {
        assert_mat_eq_2(&mat_mul_2(&HADAMARD, &HADAMARD), &IDENTITY);
    }

    #[test]
    fn test_sqrt_x_squares_to_x() {
        assert_mat_eq_2(&mat_mul_2(&SQRT_X, &SQRT_X), &PAULI_X);
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        assert_mat_eq_2(&rotation_x(0.0), &IDENTITY);
        assert_mat_eq_2(&rotation_y(0.0), &IDENTITY);
        assert_mat_eq_2(&rotation_z(0.0), &IDENTITY);
        assert_mat_eq_2(&rphi(0.3, 0.0), &IDENTITY);
    }

    #[test]
    fn test_rphi_axis_zero_matches_rx() {
        // φ = 0 rotates about X.
        assert_mat_eq_2(&rphi(0.0, 0.7), &rotation_x(0.7));
    }

    #[test]
    fn test_rphi_axis_half_pi_matches_ry() {
        use std::f64::consts::FRAC_PI_2;
        assert_mat_eq_2(&rphi(FRAC_PI_2, 0.7), &rotation_y(0.7));
    }

    #[test]
    fn test_rphi90_is_rphi_at_quarter_turn() {
        use std::f64::consts::{FRAC_PI_2, PI};
        assert_mat_eq_2(&rphi90(0.4), &rphi(0.4, FRAC_PI_2));
        assert_mat_eq_2(&rphi180(0.4), &rphi(0.4, PI));
    }

    #[test]
    fn test_xy_full_angle_is_iswap_like() {
        // XY(π) maps |01⟩ → -i|10⟩.
        let m = xy(std::f64::consts::PI);
        assert_relative_eq!(m[1][1].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(m[1][2].im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(m[2][1].im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_u22_layout() {
        let params = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let m = u22(&params);
        assert_eq!(m[0][0], Complex64::new(1.0, 2.0));
        assert_eq!(m[0][1], Complex64::new(3.0, 4.0));
        assert_eq!(m[1][0], Complex64::new(5.0, 6.0));
        assert_eq!(m[1][1], Complex64::new(7.0, 8.0));
    }

    #[test]
    fn test_cnot_blocks() {
        // Control high bit set: target column swapped.
        assert_eq!(CNOT[2][3], ONE);
        assert_eq!(CNOT[3][2], ONE);
        assert_eq!(CNOT[0][0], ONE);
        assert_eq!(CNOT[1][1], ONE);
    }
}
