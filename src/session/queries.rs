//! Fixed query templates. Follow-ups embed the master itinerary verbatim.

use super::tab::Tab;
use crate::{core::planner::CONTEXT_SEPARATOR, types::TripRequest};

const ENRICH_WITH_LINKS: &str = "ALWAYS enrich the output with up-to-date links.";

/// Query handed to the master planner
pub fn master_query(request: &TripRequest) -> String {
    format!(
        "Plan a trip to {destination} with the following details:\n\
         - Dates: {start} for {days} days\n\
         - Budget Level: {budget}\n\
         - Number of Travelers: {travelers}\n\
         - Interests: {interests}\n\
         Additional Information: {notes}\n\n\
         - Always make sure your information is enriched with up-to-date information and relevant URLs.\n\
         - Output the detailed and very well organized daily itinerary with relevant URLs and up-to-date information.",
        destination = request.destination(),
        start = request.start_date(),
        days = request.duration_days(),
        budget = request.budget(),
        travelers = request.travelers(),
        interests = request.interests_list(),
        notes = request.additional_info(),
    )
}

/// Query for one follow-up tab, built around the master itinerary
pub fn tab_query(tab: Tab, request: &TripRequest, itinerary: &str) -> String {
    let ask = match tab {
        Tab::Transportation => format!(
            "Create a comprehensive transportation plan including getting there, local \
             transportation, and estimated costs for {} travelers. {}",
            request.travelers(),
            ENRICH_WITH_LINKS
        ),
        Tab::Safety => format!(
            "Provide current safety information and travel advisories. {}",
            ENRICH_WITH_LINKS
        ),
        Tab::Packing => format!(
            "Create a detailed packing list for {} days in {}, considering the activities: [{}] \
             and the weather during {}. {}",
            request.duration_days(),
            request.destination(),
            request.interests_list(),
            request.start_date(),
            ENRICH_WITH_LINKS
        ),
        Tab::BudgetBreakdown => format!(
            "Create a detailed budget breakdown for {} days in {} for {} travelers at {} level, \
             including all expenses.",
            request.duration_days(),
            request.destination(),
            request.travelers(),
            request.budget()
        ),
    };

    format!("Here's the current itinerary: {itinerary}\n{CONTEXT_SEPARATOR}\n{ask}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BudgetTier, Interest, TripForm};
    use chrono::NaiveDate;

    fn request(interests: Vec<Interest>) -> TripRequest {
        TripRequest::try_from(TripForm {
            destination: "Paris".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            duration_days: 3,
            budget: BudgetTier::Moderate,
            travelers: 2,
            interests,
            additional_info: "Vegetarian meals".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_master_query_lists_every_field() {
        let query = master_query(&request(vec![Interest::Culture, Interest::Food]));
        assert!(query.starts_with("Plan a trip to Paris"));
        assert!(query.contains("- Dates: 2026-06-01 for 3 days"));
        assert!(query.contains("- Budget Level: Moderate"));
        assert!(query.contains("- Number of Travelers: 2"));
        assert!(query.contains("- Interests: Culture, Food"));
        assert!(query.contains("Additional Information: Vegetarian meals"));
    }

    #[test]
    fn test_tab_queries_carry_key_phrases() {
        let request = request(vec![Interest::Culture, Interest::Food]);
        let transport = tab_query(Tab::Transportation, &request, "ITIN");
        assert!(transport.contains("2 travelers"));

        let packing = tab_query(Tab::Packing, &request, "ITIN");
        assert!(packing.contains("3 days in Paris"));
        assert!(packing.contains("[Culture, Food]"));

        let budget = tab_query(Tab::BudgetBreakdown, &request, "ITIN");
        assert!(budget.contains("for 2 travelers at Moderate level"));
        assert!(!budget.contains("ALWAYS enrich"));
    }

    #[test]
    fn test_every_tab_embeds_itinerary_verbatim() {
        let request = request(Vec::new());
        let itinerary = "## Day 1\n- Louvre (https://www.louvre.fr)\n## Day 2";
        for tab in Tab::ALL {
            let query = tab_query(tab, &request, itinerary);
            assert!(
                query.starts_with(&format!("Here's the current itinerary: {itinerary}\n")),
                "{tab}"
            );
        }
    }

    #[test]
    fn test_empty_interests_render() {
        let request = request(Vec::new());
        assert!(master_query(&request).contains("- Interests: \n"));
        assert!(tab_query(Tab::Packing, &request, "x").contains("activities: []"));
    }
}
