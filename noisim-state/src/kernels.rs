//! Gate application loops over the amplitude array
//!
//! Both kernels walk every basis index and update the amplitude group the
//! target bits select. A controller mask restricts the update to indices
//! whose controller bits are all 1; everything else passes through
//! untouched. The dagger flag conjugate-transposes the matrix as its
//! elements are loaded, so no temporary matrix is built.

use num_complex::Complex64;

/// Apply a 2×2 matrix to the amplitude pairs split by `qubit`
///
/// For every index i with the qubit bit clear and `(i & cmask) == cmask`,
/// the pair (i, i | 1<<qubit) is updated by the matrix.
pub fn apply_single_qubit(
    state: &mut [Complex64],
    matrix: &[[Complex64; 2]; 2],
    qubit: usize,
    cmask: usize,
    dagger: bool,
) {
    let qmask = 1usize << qubit;

    let (m00, m01, m10, m11) = if dagger {
        (
            matrix[0][0].conj(),
            matrix[1][0].conj(),
            matrix[0][1].conj(),
            matrix[1][1].conj(),
        )
    } else {
        (matrix[0][0], matrix[0][1], matrix[1][0], matrix[1][1])
    };

    for i in 0..state.len() {
        if i & qmask != 0 {
            continue;
        }
        if i & cmask != cmask {
            continue;
        }
        let j = i | qmask;

        let a0 = state[i];
        let a1 = state[j];
        state[i] = m00 * a0 + m01 * a1;
        state[j] = m10 * a0 + m11 * a1;
    }
}

/// Apply a 4×4 matrix to the amplitude quadruples split by two qubits
///
/// The block index of an amplitude is `(bit(qubit1) << 1) | bit(qubit2)`:
/// the first qubit is the high bit, matching the matrix constants in
/// `noisim-gates`.
pub fn apply_two_qubit(
    state: &mut [Complex64],
    matrix: &[[Complex64; 4]; 4],
    qubit1: usize,
    qubit2: usize,
    cmask: usize,
    dagger: bool,
) {
    let m1 = 1usize << qubit1;
    let m2 = 1usize << qubit2;

    let mut m = [[Complex64::new(0.0, 0.0); 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            m[r][c] = if dagger {
                matrix[c][r].conj()
            } else {
                matrix[r][c]
            };
        }
    }

    for i in 0..state.len() {
        if i & (m1 | m2) != 0 {
            continue;
        }
        if i & cmask != cmask {
            continue;
        }
        let i00 = i;
        let i01 = i | m2;
        let i10 = i | m1;
        let i11 = i | m1 | m2;

        let a = [state[i00], state[i01], state[i10], state[i11]];
        let mut r = [Complex64::new(0.0, 0.0); 4];
        for row in 0..4 {
            for col in 0..4 {
                r[row] += m[row][col] * a[col];
            }
        }

        state[i00] = r[0];
        state[i01] = r[1];
        state[i10] = r[2];
        state[i11] = r[3];
    }
}
