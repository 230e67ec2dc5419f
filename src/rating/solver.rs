use crate::errors::SolverError;

/// Finds a root of `f` inside `[a, b]` with the Illinois variant of the
/// false-position method.
///
/// The bracket endpoints must have function values of opposite sign. Each
/// step replaces one endpoint with the secant intersection; when the same
/// endpoint survives twice in a row its retained function value is halved,
/// which is what keeps plain regula falsi from stalling on one side.
///
/// Returns the `a` endpoint of the final bracket once its width drops to
/// `tolerance`. Iteration is capped: exceeding `max_iterations` is an
/// explicit error, never a spin.
pub fn illinois<F>(
    f: F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<f64, SolverError>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa * fb > 0.0 {
        return Err(SolverError::InvalidBracket);
    }

    let mut iterations = 0;
    while (b - a).abs() > tolerance {
        if iterations >= max_iterations {
            return Err(SolverError::MaxIterations {
                max_iterations,
                bracket_width: (b - a).abs(),
            });
        }
        iterations += 1;

        let c = a + (a - b) * fa / (fb - fa);
        let fc = f(c);

        if fc == 0.0 {
            return Ok(c);
        }

        if fc * fb < 0.0 {
            a = b;
            fa = fb;
        } else {
            // Same-sign replacement: halve the retained value.
            fa /= 2.0;
        }

        b = c;
        fb = fc;
    }

    Ok(a)
}
