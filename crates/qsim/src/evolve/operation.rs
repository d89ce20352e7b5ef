//! Path-mode state vectors and the unitary operations acting on them.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use nalgebra::{Complex, DMatrix, DVector};

use crate::error::SimError;

pub type Amplitude = Complex<f64>;

const ZERO: Amplitude = Complex::new(0.0, 0.0);

/// Photon path state: one complex amplitude per path mode.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    vector: DVector<Amplitude>,
}

impl State {
    pub fn from_vector(vector: DVector<Amplitude>) -> Self {
        Self { vector }
    }

    /// Basis vector `e0` of dimension `dimension` (photon in the first path mode).
    ///
    /// A zero dimension yields the empty vector.
    pub fn from_path_modes(dimension: usize) -> Self {
        let mut vector = DVector::from_element(dimension, ZERO);
        if dimension > 0 {
            vector[0] = Complex::new(1.0, 0.0);
        }
        Self { vector }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    #[inline]
    pub fn vector(&self) -> &DVector<Amplitude> {
        &self.vector
    }

    #[inline]
    pub fn amplitude(&self, mode: usize) -> Option<Amplitude> {
        self.vector.get(mode).copied()
    }

    /// `(mode, amplitude)` pairs in mode order.
    pub fn labeled(&self) -> impl Iterator<Item = (usize, Amplitude)> + '_ {
        self.vector.iter().copied().enumerate()
    }

    /// Detection probability per mode, `|a_k|²`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.vector.iter().map(|a| a.norm_sqr()).collect()
    }

    pub fn norm_squared(&self) -> f64 {
        self.vector.iter().map(|a| a.norm_sqr()).sum()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State([")?;
        for (k, a) in self.labeled() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.5}{:+.5}i", a.re, a.im)?;
        }
        write!(f, "])")
    }
}

/// Square complex matrix acting on path-mode states.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    matrix: DMatrix<Amplitude>,
}

impl Operation {
    pub fn identity(dimension: usize) -> Self {
        Self {
            matrix: DMatrix::identity(dimension, dimension),
        }
    }

    /// Symmetric 50/50 splitter mixing modes `out1` and `out2` in place.
    pub fn beam_splitter(dimension: usize, out1: usize, out2: usize) -> Result<Self, SimError> {
        Self::beam_splitter_between(dimension, (out1, out2), (out1, out2))
    }

    /// 50/50 splitter taking input modes `(in1, in2)` to output modes `(out1, out2)`.
    ///
    /// Input columns are cleared, then
    /// `U[out1,in1] = U[out2,in2] = 1/√2` and `U[out1,in2] = U[out2,in1] = i/√2`.
    pub fn beam_splitter_between(
        dimension: usize,
        (in1, in2): (usize, usize),
        (out1, out2): (usize, usize),
    ) -> Result<Self, SimError> {
        for mode in [in1, in2, out1, out2] {
            if mode >= dimension {
                return Err(SimError::ModeOutOfRange { mode, dimension });
            }
        }
        let mut op = Self::identity(dimension);
        let t = Complex::new(FRAC_1_SQRT_2, 0.0);
        let r = Complex::new(0.0, FRAC_1_SQRT_2);
        op.matrix.column_mut(in1).fill(ZERO);
        op.matrix.column_mut(in2).fill(ZERO);
        op.matrix[(out1, in1)] = t;
        op.matrix[(out1, in2)] = r;
        op.matrix[(out2, in1)] = r;
        op.matrix[(out2, in2)] = t;
        Ok(op)
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn matrix(&self) -> &DMatrix<Amplitude> {
        &self.matrix
    }

    /// Compose `other` after `self`: `self ← other · self`.
    pub fn cascade(&mut self, other: &Operation) {
        self.matrix = &other.matrix * &self.matrix;
    }

    pub fn apply(&self, state: &State) -> State {
        State::from_vector(&self.matrix * state.vector())
    }

    /// `max |U^† U − I| <= eps`.
    pub fn is_unitary(&self, eps: f64) -> bool {
        let n = self.dimension();
        let gram = self.matrix.adjoint() * &self.matrix;
        let id = DMatrix::<Amplitude>::identity(n, n);
        (gram - id).iter().all(|z| z.norm() <= eps)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Operation(")?;
        for row in self.matrix.row_iter() {
            let cells: Vec<String> = row
                .iter()
                .map(|z| format!("{:.5}{:+.5}i", z.re, z.im))
                .collect();
            writeln!(f, "  [{}]", cells.join(", "))?;
        }
        write!(f, ")")
    }
}
