use std::fmt;

/// Follow-up regions shown after the master itinerary, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Transportation,
    Safety,
    Packing,
    BudgetBreakdown,
}

/// Which specialist answers a tab's query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAgent {
    Logistics,
    Info,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Transportation,
        Tab::Safety,
        Tab::Packing,
        Tab::BudgetBreakdown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Transportation => "🚗 Transportation",
            Tab::Safety => "🦺 Safety Info",
            Tab::Packing => "🧳 Packing List",
            Tab::BudgetBreakdown => "💰 Budget Breakdown",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Tab::Transportation => "Transportation Plan",
            Tab::Safety => "Safety Info",
            Tab::Packing => "Packing List",
            Tab::BudgetBreakdown => "Budget Breakdown",
        }
    }

    pub fn agent(&self) -> TabAgent {
        match self {
            Tab::Transportation => TabAgent::Logistics,
            Tab::Safety | Tab::Packing | Tab::BudgetBreakdown => TabAgent::Info,
        }
    }

    /// Position in [`Tab::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Tab::Transportation => 0,
            Tab::Safety => 1,
            Tab::Packing => 2,
            Tab::BudgetBreakdown => 3,
        }
    }

    /// Static Markdown shown under the agent's answer
    pub fn extras(&self) -> Option<&'static str> {
        match self {
            Tab::Transportation => Some(QUICK_LINKS),
            _ => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

pub const QUICK_LINKS: &str = "\
### Quick Links
- [Search Flights](https://www.skyscanner.com)
- [Book Train Tickets](https://www.raileurope.com)
- [Local Transport Info](https://www.rome2rio.com)";

pub const EMERGENCY_CONTACTS: &str = "\
### 🆘 Emergency Contacts
- Local Emergency: 911
- Nearest Embassy: [Find Embassy](https://www.embassy-worldwide.com)
- Travel Insurance: [Your policy number]";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (idx, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), idx);
        }
    }

    #[test]
    fn test_only_transportation_goes_to_logistics() {
        let logistics: Vec<Tab> = Tab::ALL
            .into_iter()
            .filter(|tab| tab.agent() == TabAgent::Logistics)
            .collect();
        assert_eq!(logistics, vec![Tab::Transportation]);
        assert!(Tab::Transportation.extras().unwrap().contains("rome2rio"));
        assert!(Tab::Safety.extras().is_none());
    }
}
