use crate::error::{ChoroplethError, Result};

/// ColorBrewer sequential Greens, 3 through 9 classes, light to dark.
const GREENS: [&[&str]; 7] = [
    &["#e5f5e0", "#a1d99b", "#31a354"],
    &["#edf8e9", "#bae4b3", "#74c476", "#238b45"],
    &["#edf8e9", "#bae4b3", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &[
        "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
        "#00441b",
    ],
];

/// The Greens palette with `buckets` swatches.
pub fn greens(buckets: usize) -> Result<&'static [&'static str]> {
    match buckets {
        3..=9 => Ok(GREENS[buckets - 3]),
        _ => Err(ChoroplethError::PaletteSize(buckets)),
    }
}

/// Quantize scale: equal-width buckets over `[min, max]` mapped onto an
/// ordered palette. Values outside the domain clamp to the end buckets.
#[derive(Debug, Clone)]
pub struct QuantizeScale {
    min: f64,
    max: f64,
    palette: &'static [&'static str],
}

impl QuantizeScale {
    /// Build a scale over `[min, max]` with the given palette.
    pub fn new(min: f64, max: f64, palette: &'static [&'static str]) -> Result<Self> {
        if !(min < max) {
            return Err(ChoroplethError::DegenerateRange(min));
        }
        if palette.is_empty() {
            return Err(ChoroplethError::PaletteSize(0));
        }
        Ok(Self { min, max, palette })
    }

    /// Scale over `[min, max]` colored by the `buckets`-class Greens palette.
    pub fn with_greens(min: f64, max: f64, buckets: usize) -> Result<Self> {
        Self::new(min, max, greens(buckets)?)
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[inline]
    pub fn buckets(&self) -> usize {
        self.palette.len()
    }

    /// Index of the equal-width bucket containing `value`.
    ///
    /// Float-to-int casts saturate, so values below the domain land in
    /// bucket zero; values at or above `max` land in the last bucket.
    pub fn bucket(&self, value: f64) -> usize {
        let n = self.palette.len();
        let t = (value - self.min) / (self.max - self.min);
        ((t * n as f64).floor() as usize).min(n - 1)
    }

    /// Color for `value`.
    #[inline]
    pub fn color(&self, value: f64) -> &'static str {
        self.palette[self.bucket(value)]
    }
}

/// Evenly spaced legend tick values over `[min, max)`, rounded to whole
/// percentages.
///
/// The walk takes steps of `(max - min) / count` starting at `min`, stops
/// once it reaches `max`, and collapses adjacent equal rounded values, so
/// the result is strictly increasing with at most `count` entries and the
/// first entry is `min` rounded.
pub fn legend_ticks(min: f64, max: f64, count: usize) -> Result<Vec<i32>> {
    debug_assert!(count > 0, "tick count must be positive");
    if !(min < max) {
        return Err(ChoroplethError::DegenerateRange(min));
    }

    let step = (max - min) / count as f64;
    let mut ticks: Vec<i32> = Vec::with_capacity(count);
    let mut value = min;
    // Accumulated float error can leave the last value a hair under `max`;
    // capping the walk at `count` emissions keeps the length bound exact.
    for _ in 0..count {
        if !(value < max) {
            break;
        }
        let rounded = value.round() as i32;
        if ticks.last() != Some(&rounded) {
            ticks.push(rounded);
        }
        value += step;
    }
    Ok(ticks)
}

/// Linear interpolation from `domain` onto `range` (the legend axis scale).
pub(crate) fn linear(domain: (f64, f64), range: (f64, f64)) -> impl Fn(f64) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    // A collapsed domain pins everything to the left edge of the range.
    let span = if d1 == d0 { 1.0 } else { d1 - d0 };
    move |v| r0 + (v - d0) / span * (r1 - r0)
}

#[cfg(test)]
mod tests {
    use super::{greens, legend_ticks, linear, QuantizeScale};
    use crate::error::ChoroplethError;

    #[test]
    fn greens_palette_sizes() {
        for buckets in 3..=9 {
            assert_eq!(greens(buckets).unwrap().len(), buckets);
        }
        assert!(matches!(greens(2), Err(ChoroplethError::PaletteSize(2))));
        assert!(matches!(greens(10), Err(ChoroplethError::PaletteSize(10))));
    }

    #[test]
    fn endpoints_map_to_end_buckets() {
        let scale = QuantizeScale::with_greens(10.0, 90.0, 7).unwrap();
        assert_eq!(scale.domain(), (10.0, 90.0));
        assert_eq!(scale.buckets(), 7);
        assert_eq!(scale.color(10.0), "#edf8e9");
        assert_eq!(scale.color(90.0), "#005a32");
    }

    #[test]
    fn out_of_range_values_clamp() {
        let scale = QuantizeScale::with_greens(10.0, 90.0, 7).unwrap();
        assert_eq!(scale.color(-5.0), scale.color(10.0));
        assert_eq!(scale.color(200.0), scale.color(90.0));
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        let scale = QuantizeScale::with_greens(0.0, 70.0, 7).unwrap();
        assert_eq!(scale.bucket(9.99), 0);
        assert_eq!(scale.bucket(10.0), 1);
        assert_eq!(scale.bucket(69.99), 6);
        assert_eq!(scale.bucket(70.0), 6);
    }

    #[test]
    fn collapsed_domain_is_rejected() {
        assert!(matches!(
            QuantizeScale::with_greens(42.0, 42.0, 7),
            Err(ChoroplethError::DegenerateRange(v)) if v == 42.0
        ));
    }

    #[test]
    fn identical_scales_agree_everywhere() {
        let a = QuantizeScale::with_greens(2.6, 75.1, 7).unwrap();
        let b = QuantizeScale::with_greens(2.6, 75.1, 7).unwrap();
        let mut value = 0.0;
        while value < 80.0 {
            assert_eq!(a.color(value), b.color(value));
            value += 0.7;
        }
    }

    #[test]
    fn ticks_walk_the_domain() {
        assert_eq!(legend_ticks(10.0, 90.0, 5).unwrap(), vec![10, 26, 42, 58, 74]);
        assert_eq!(
            legend_ticks(10.0, 90.0, 8).unwrap(),
            vec![10, 20, 30, 40, 50, 60, 70, 80]
        );
    }

    #[test]
    fn first_tick_is_rounded_min() {
        let ticks = legend_ticks(2.6, 75.1, 8).unwrap();
        assert_eq!(ticks[0], 3);
        assert_eq!(ticks.len(), 8);
        assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn adjacent_equal_ticks_collapse() {
        // Steps of 0.2 round to a run of 0s and a run of 1s.
        assert_eq!(legend_ticks(0.0, 1.0, 5).unwrap(), vec![0, 1]);
    }

    #[test]
    fn degenerate_tick_range_is_rejected() {
        assert!(matches!(
            legend_ticks(33.3, 33.3, 8),
            Err(ChoroplethError::DegenerateRange(_))
        ));
    }

    #[test]
    fn linear_maps_endpoints_onto_range() {
        let scale = linear((10.0, 80.0), (10.0, 240.0));
        assert!((scale(10.0) - 10.0).abs() < 1e-9);
        assert!((scale(80.0) - 240.0).abs() < 1e-9);
        assert!((scale(45.0) - 125.0).abs() < 1e-9);
    }
}
