//! Spectrum construction and normalization helpers.

use crate::error::{GeometryError, Result, ShapeError};
use crate::math::{Vector, TOLERANCE};

/// Builds an extreme (0/1 step) reflectance spectrum.
///
/// The level at a sample is `one_first` flipped once per transition strictly
/// above that wavelength: past the last transition the spectrum sits at the
/// `one_first` level, and a sample equal to a transition already carries the
/// longer-wavelength side's level.
#[must_use]
pub fn extreme_spectrum(wavelengths: &Vector, one_first: bool, transitions: &[f64]) -> Vector {
    Vector::from_iterator(
        wavelengths.len(),
        wavelengths.iter().map(|&w| {
            let mut on = one_first;
            for &transition in transitions {
                on ^= transition > w;
            }
            f64::from(u8::from(on))
        }),
    )
}

/// Rescales a spectral density to integrate to 1 over the wavelength grid.
///
/// The integral uses midpoint bins: each sample owns the interval between
/// the midpoints to its neighbours, with half-width bins at the ends.
///
/// # Errors
///
/// Returns [`ShapeError::WavelengthCount`] on a length mismatch and
/// [`GeometryError::Degenerate`] when the integrated area vanishes.
pub fn normalise_spectral_density(wavelengths: &Vector, density: &Vector) -> Result<Vector> {
    let n = wavelengths.len();
    if density.len() != n {
        return Err(ShapeError::WavelengthCount {
            expected: n,
            actual: density.len(),
        }
        .into());
    }

    let bound = |i: usize| {
        if i == 0 {
            wavelengths[0]
        } else if i == n {
            wavelengths[n - 1]
        } else {
            0.5 * (wavelengths[i - 1] + wavelengths[i])
        }
    };

    let mut area = 0.0;
    for i in 0..n {
        area += density[i] * (bound(i + 1) - bound(i));
    }
    if area.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate(
            "spectral density has zero integrated area".into(),
        )
        .into());
    }

    Ok(density / area)
}

/// Fraction of light transmitted through a medium of the given optical
/// depth, per sample of the absorption coefficient spectrum.
#[must_use]
pub fn total_transmission(absorption_coefficient: &Vector, optical_depth: f64) -> Vector {
    absorption_coefficient.map(|a| (-a * optical_depth).exp())
}

/// Fraction of light absorbed; the complement of [`total_transmission`].
#[must_use]
pub fn total_absorption(absorption_coefficient: &Vector, optical_depth: f64) -> Vector {
    total_transmission(absorption_coefficient, optical_depth).map(|t| 1.0 - t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(entries: &[f64]) -> Vector {
        Vector::from_row_slice(entries)
    }

    #[test]
    fn band_pass_spectrum() {
        let wavelengths = v(&[350.0, 450.0, 550.0, 650.0]);
        let spectrum = extreme_spectrum(&wavelengths, true, &[400.0, 500.0]);

        // Starts at one, dips to zero between the transitions.
        assert_relative_eq!(spectrum[0], 1.0);
        assert_relative_eq!(spectrum[1], 0.0);
        assert_relative_eq!(spectrum[2], 1.0);
        assert_relative_eq!(spectrum[3], 1.0);
    }

    #[test]
    fn transition_samples_carry_the_longer_wavelength_level() {
        // A lone transition flips everything strictly below it; the sample at
        // exactly 400 already sits on the longer-wavelength level.
        let wavelengths = v(&[399.0, 400.0, 401.0]);
        let spectrum = extreme_spectrum(&wavelengths, true, &[400.0]);

        assert_relative_eq!(spectrum[0], 0.0);
        assert_relative_eq!(spectrum[1], 1.0);
        assert_relative_eq!(spectrum[2], 1.0);
    }

    #[test]
    fn no_transitions_gives_a_flat_spectrum() {
        let wavelengths = v(&[300.0, 500.0, 700.0]);
        let ones = extreme_spectrum(&wavelengths, true, &[]);
        let zeros = extreme_spectrum(&wavelengths, false, &[]);
        for i in 0..3 {
            assert_relative_eq!(ones[i], 1.0);
            assert_relative_eq!(zeros[i], 0.0);
        }
    }

    #[test]
    fn normalised_density_integrates_to_one() {
        let wavelengths = v(&[400.0, 500.0, 550.0, 700.0]);
        let density = v(&[1.0, 3.0, 2.0, 0.5]);
        let normalised = normalise_spectral_density(&wavelengths, &density).unwrap();

        // Recompute the integral with the same midpoint bins.
        let bounds = [400.0, 450.0, 525.0, 625.0, 700.0];
        let mut area = 0.0;
        for i in 0..4 {
            area += normalised[i] * (bounds[i + 1] - bounds[i]);
        }
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn uniform_density_normalises_to_the_reciprocal_span() {
        let wavelengths = v(&[300.0, 400.0, 500.0]);
        let density = v(&[2.0, 2.0, 2.0]);
        let normalised = normalise_spectral_density(&wavelengths, &density).unwrap();
        for i in 0..3 {
            assert_relative_eq!(normalised[i], 1.0 / 200.0);
        }
    }

    #[test]
    fn zero_area_density_is_an_error() {
        let wavelengths = v(&[300.0, 400.0, 500.0]);
        assert!(normalise_spectral_density(&wavelengths, &v(&[0.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn mismatched_density_length_is_an_error() {
        let wavelengths = v(&[300.0, 400.0]);
        assert!(normalise_spectral_density(&wavelengths, &v(&[1.0])).is_err());
    }

    #[test]
    fn transmission_and_absorption_are_complementary() {
        let absorption = v(&[0.0, 0.5, 2.0]);
        let transmitted = total_transmission(&absorption, 1.5);
        let absorbed = total_absorption(&absorption, 1.5);

        assert_relative_eq!(transmitted[0], 1.0);
        assert_relative_eq!(transmitted[1], (-0.75_f64).exp());
        for i in 0..3 {
            assert_relative_eq!(transmitted[i] + absorbed[i], 1.0, epsilon = 1e-12);
        }
    }
}
