use num_complex::Complex64;

/// Scalar coefficient carried by terms, expressions and matrix entries.
pub type Coefficient = Complex64;

/// Magnitude below which [`Coefficient`]s are considered numerical noise.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Builds a purely real coefficient.
pub fn real(value: f64) -> Coefficient {
    Coefficient::new(value, 0.0)
}

/// Builds a purely imaginary coefficient.
pub fn imag(value: f64) -> Coefficient {
    Coefficient::new(0.0, value)
}

/// Returns true when both components of `a - b` are below `tolerance`.
pub fn approx_eq(a: Coefficient, b: Coefficient, tolerance: f64) -> bool {
    let diff = a - b;
    diff.re.abs() < tolerance && diff.im.abs() < tolerance
}
