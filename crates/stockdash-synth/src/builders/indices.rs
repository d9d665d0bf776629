//! Market overview index lines.

use rand::Rng;
use serde::{Deserialize, Serialize};
use stockdash_core::{DashboardContext, GenerationError, IndexPoint};

use crate::plan::SamplingPlan;
use crate::walk::walk_points;

/// An index to simulate and the level it starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub base_value: f64,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, base_value: f64) -> Self {
        Self {
            name: name.into(),
            base_value,
        }
    }
}

/// The three headline US indices.
pub fn default_indices() -> Vec<IndexSpec> {
    vec![
        IndexSpec::new("S&P 500", 6088.76),
        IndexSpec::new("NASDAQ", 19854.69),
        IndexSpec::new("DOW JONES", 44634.44),
    ]
}

/// One index line plus its headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSeries {
    pub name: String,
    pub points: Vec<IndexPoint>,
    /// Value of the last point, or the base value for an empty line
    pub last_value: f64,
    /// First-to-last change in percent
    pub percent_change: f64,
}

impl IndexSeries {
    pub fn is_positive(&self) -> bool {
        self.percent_change >= 0.0
    }
}

/// First-to-last change of a line in percent; `0.0` below two points.
pub fn percent_change(points: &[IndexPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 && first.value != 0.0 => {
            (last.value - first.value) / first.value * 100.0
        }
        _ => 0.0,
    }
}

/// Walk every index independently over the context's shared timeframe.
pub fn build_indices<R: Rng + ?Sized>(
    ctx: &DashboardContext,
    specs: &[IndexSpec],
    rng: &mut R,
) -> Result<Vec<IndexSeries>, GenerationError> {
    let plan = SamplingPlan::resolve(ctx.timeframe, ctx.now)?;

    specs
        .iter()
        .map(|spec| {
            let points = walk_points(spec.base_value, &plan, &mut *rng)?;
            Ok(IndexSeries {
                name: spec.name.clone(),
                last_value: points.last().map(|p| p.value).unwrap_or(spec.base_value),
                percent_change: percent_change(&points),
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use stockdash_core::Timeframe;

    fn ctx(timeframe: Timeframe) -> DashboardContext {
        let now = DateTime::parse_from_rfc3339("2025-01-15T14:00:00-05:00").unwrap();
        DashboardContext::new("AAPL", timeframe, now)
    }

    #[test]
    fn test_percent_change() {
        let points = vec![IndexPoint::new(1, 100.0), IndexPoint::new(2, 99.0), IndexPoint::new(3, 101.5)];
        assert!((percent_change(&points) - 1.5).abs() < 1e-9);
        assert_eq!(percent_change(&points[..1]), 0.0);
        assert_eq!(percent_change(&[]), 0.0);
    }

    #[test]
    fn test_indices_share_timestamps() {
        let series = build_indices(&ctx(Timeframe::Month), &default_indices(), &mut StdRng::seed_from_u64(4))
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].name, "S&P 500");
        let times: Vec<_> = series[0].points.iter().map(|p| p.timestamp).collect();
        for s in &series {
            assert_eq!(s.points.len(), 22);
            assert_eq!(s.points.iter().map(|p| p.timestamp).collect::<Vec<_>>(), times);
            assert_eq!(s.last_value, s.points.last().unwrap().value);
            assert!((s.percent_change - percent_change(&s.points)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_indices_stay_near_their_base() {
        let series = build_indices(&ctx(Timeframe::Intraday), &default_indices(), &mut StdRng::seed_from_u64(8))
            .unwrap();
        // 78 steps of at most 0.1% each.
        let (up, down) = (1.001f64.powi(78), 0.999f64.powi(78));
        for (s, spec) in series.iter().zip(default_indices()) {
            for p in &s.points {
                assert!(p.value <= spec.base_value * up + 0.01);
                assert!(p.value >= spec.base_value * down - 0.01);
            }
        }
    }

    #[test]
    fn test_invalid_index_base_fails() {
        let specs = vec![IndexSpec::new("BROKEN", 0.0)];
        assert!(build_indices(&ctx(Timeframe::Year), &specs, &mut StdRng::seed_from_u64(0)).is_err());
    }
}
