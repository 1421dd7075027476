use crate::{error::Result, types::TripRequest};
use std::path::{Path, PathBuf};
use tracing::info;

/// `travel_plan_{destination}_{start_date}.md`, with path separators in the
/// destination replaced so the name stays a single file
pub fn file_name(request: &TripRequest) -> String {
    let destination: String = request
        .destination()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("travel_plan_{}_{}.md", destination, request.start_date())
}

/// Write the master itinerary as Markdown into `dir`, returning the path
pub fn write_itinerary(dir: &Path, request: &TripRequest, itinerary: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(request));
    std::fs::write(&path, itinerary)?;
    info!(
        target: "travel_planner::session",
        path = %path.display(),
        bytes = itinerary.len(),
        "itinerary exported"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BudgetTier, TripForm};
    use chrono::NaiveDate;

    fn request(destination: &str) -> TripRequest {
        TripRequest::try_from(TripForm {
            destination: destination.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            budget: BudgetTier::Luxury,
            ..TripForm::default()
        })
        .unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(&request("Paris")), "travel_plan_Paris_2026-06-01.md");
        assert_eq!(
            file_name(&request("Rio de Janeiro")),
            "travel_plan_Rio de Janeiro_2026-06-01.md"
        );
        assert_eq!(
            file_name(&request("A/B\\C")),
            "travel_plan_A_B_C_2026-06-01.md"
        );
    }

    #[test]
    fn test_write_itinerary() {
        let dir = tempfile::tempdir().unwrap();
        let text = "# Paris\n\n## Day 1\nLouvre";
        let path = write_itinerary(dir.path(), &request("Paris"), text).unwrap();
        assert_eq!(path, dir.path().join("travel_plan_Paris_2026-06-01.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), text);
    }
}
