use serde::Serialize;
use crate::analysis::pipeline::AnalysisResult;
use crate::models::location::ScoredLocation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilitySummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub most_accessible: String,   // Location with the smallest average distance
    pub least_accessible: String,
}

impl AccessibilitySummary {
    pub fn from_scores(scored: &[ScoredLocation]) -> Option<Self> {
        let first = scored.first()?;

        let mut most = first;
        let mut least = first;
        let mut total = 0.0;
        for location in scored {
            let d = location.average_distance();
            if d < most.average_distance() {
                most = location;
            }
            if d > least.average_distance() {
                least = location;
            }
            total += d;
        }

        Some(Self {
            count: scored.len(),
            min: most.average_distance(),
            max: least.average_distance(),
            mean: total / scored.len() as f64,
            most_accessible: label(most),
            least_accessible: label(least),
        })
    }
}

fn label(location: &ScoredLocation) -> String {
    if location.name.is_empty() {
        location.id.clone()
    } else {
        format!("{} ({})", location.name, location.id)
    }
}

pub fn print_summary(result: &AnalysisResult) {
    println!("\nAccessibility Analysis Summary:");
    println!("-------------------------------");
    println!("Formula: {}, unit: {}{}",
             result.formula,
             result.unit,
             if result.streamed { " (streamed)" } else { "" });

    let geocoding = &result.geocoding;
    println!("\nAddresses: {} total, {} resolved, {} dropped ({:.1}%)",
             geocoding.total,
             geocoding.resolved,
             geocoding.unresolved,
             geocoding.drop_rate() * 100.0);

    match AccessibilitySummary::from_scores(&result.scored) {
        Some(summary) => {
            println!("\nAverage distance to other locations ({}):", result.unit);
            println!("  min:  {:.3}", summary.min);
            println!("  max:  {:.3}", summary.max);
            println!("  mean: {:.3}", summary.mean);
            println!("\nMost accessible:  {}", summary.most_accessible);
            println!("Least accessible: {}", summary.least_accessible);
        }
        None => println!("\nNo scored locations."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accessibility::AccessibilityScore;
    use crate::data::poi::GeoPoint;

    fn scored(id: &str, name: &str, average_distance: f64) -> ScoredLocation {
        ScoredLocation {
            id: id.to_string(),
            name: name.to_string(),
            address: String::new(),
            point: GeoPoint::new(0.0, 0.0).unwrap(),
            score: AccessibilityScore { average_distance, neighbors: 2 },
        }
    }

    #[test]
    fn picks_extremes_and_mean() {
        let summary = AccessibilitySummary::from_scores(&[
            scored("1", "Library", 30.0),
            scored("2", "", 10.0),
            scored("3", "Depot", 50.0),
        ]).unwrap();

        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 50.0);
        assert_eq!(summary.mean, 30.0);
        assert_eq!(summary.most_accessible, "2");
        assert_eq!(summary.least_accessible, "Depot (3)");
    }

    #[test]
    fn empty_has_no_summary() {
        assert!(AccessibilitySummary::from_scores(&[]).is_none());
    }
}
