use crate::{
    session::{Surface, Tab, EMERGENCY_CONTACTS},
    types::{format_currency, BudgetMetrics, TripRequest},
};

/// Prints each section as Markdown on stdout; progress goes to stderr
#[derive(Debug, Default)]
pub struct TerminalSurface;

impl TerminalSurface {
    pub fn new() -> Self {
        Self
    }
}

impl Surface for TerminalSurface {
    fn working(&mut self, message: &str) {
        eprintln!("⏳ {}", message);
    }

    fn show_master(&mut self, request: &TripRequest, itinerary: &str) {
        println!("{}", master_section(request, itinerary));
    }

    fn show_tab(&mut self, tab: Tab, content: &str) {
        println!("{}", tab_section(tab, content));
    }

    fn show_emergency_contacts(&mut self) {
        println!("\n{}\n", EMERGENCY_CONTACTS);
    }
}

pub fn master_section(request: &TripRequest, itinerary: &str) -> String {
    format!(
        "\n✅ Your travel plan is ready!\n\n# {} ({} days from {})\n\n{}\n",
        request.destination(),
        request.duration_days(),
        request.start_date(),
        itinerary.trim_end()
    )
}

pub fn tab_section(tab: Tab, content: &str) -> String {
    let mut section = format!(
        "\n## {}\n\n### {}\n\n{}\n",
        tab.label(),
        tab.heading(),
        content.trim_end()
    );
    if let Some(extras) = tab.extras() {
        section.push('\n');
        section.push_str(extras);
        section.push('\n');
    }
    section
}

pub fn budget_section(metrics: &BudgetMetrics) -> String {
    format!(
        "### Budget Calculator\n\
         - Total Budget: {}\n\
         - Per Person: {}\n\
         - Per Day: {}",
        format_currency(metrics.total),
        format_currency(metrics.per_person),
        format_currency(metrics.per_day)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BudgetBreakdown;

    #[test]
    fn test_transportation_section_has_quick_links() {
        let section = tab_section(Tab::Transportation, "Take the RER B.\n");
        assert!(section.contains("## 🚗 Transportation"));
        assert!(section.contains("### Transportation Plan"));
        assert!(section.contains("Take the RER B.\n\n### Quick Links"));
        assert!(!tab_section(Tab::Safety, "ok").contains("Quick Links"));
    }

    #[test]
    fn test_budget_section() {
        let metrics = BudgetBreakdown::new(1500.0, 400.0, 250.0, 350.0)
            .unwrap()
            .metrics(2, 5)
            .unwrap();
        let section = budget_section(&metrics);
        assert!(section.contains("Total Budget: $2,500.00"));
        assert!(section.contains("Per Person: $1,250.00"));
        assert!(section.contains("Per Day: $500.00"));
    }
}
