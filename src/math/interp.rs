use super::Vector;

/// Piecewise-linear resampling of `(xp, fp)` samples at the points `x`.
///
/// `xp` must be strictly increasing. Query points outside `xp`'s range clamp
/// to the first/last sample value.
#[must_use]
pub fn resample(x: &Vector, xp: &Vector, fp: &Vector) -> Vector {
    Vector::from_iterator(x.len(), x.iter().map(|&xi| sample_at(xi, xp, fp)))
}

fn sample_at(x: f64, xp: &Vector, fp: &Vector) -> f64 {
    let n = xp.len();
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    // Binary search for the enclosing interval [xp[i], xp[i + 1]].
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xp[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}
