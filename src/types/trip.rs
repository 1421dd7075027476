use crate::error::{AgentError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;
pub const MIN_TRAVELERS: u32 = 1;

/// Spending level the plan should target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];

    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::Moderate => "Moderate",
            BudgetTier::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BudgetTier {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        BudgetTier::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AgentError::Validation(format!(
                    "unknown budget level `{}` (expected Budget, Moderate or Luxury)",
                    s
                ))
            })
    }
}

/// Interest tags offered by the trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Culture,
    Food,
    Nature,
    Adventure,
    Shopping,
    Relaxation,
}

impl Interest {
    pub const ALL: [Interest; 6] = [
        Interest::Culture,
        Interest::Food,
        Interest::Nature,
        Interest::Adventure,
        Interest::Shopping,
        Interest::Relaxation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Interest::Culture => "Culture",
            Interest::Food => "Food",
            Interest::Nature => "Nature",
            Interest::Adventure => "Adventure",
            Interest::Shopping => "Shopping",
            Interest::Relaxation => "Relaxation",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interest {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        Interest::ALL
            .into_iter()
            .find(|interest| interest.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AgentError::Validation(format!("unknown interest `{}`", s)))
    }
}

/// Raw form input, as typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    pub destination: String,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    pub budget: BudgetTier,
    pub travelers: u32,
    pub interests: Vec<Interest>,
    pub additional_info: String,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            start_date: Local::now().date_naive(),
            duration_days: 7,
            budget: BudgetTier::Budget,
            travelers: 2,
            interests: Vec::new(),
            additional_info: String::new(),
        }
    }
}

/// A submitted, validated trip request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    destination: String,
    start_date: NaiveDate,
    duration_days: u32,
    budget: BudgetTier,
    travelers: u32,
    interests: Vec<Interest>,
    additional_info: String,
}

impl TryFrom<TripForm> for TripRequest {
    type Error = AgentError;

    /// Only the destination and the numeric widget bounds are checked; a
    /// start date in the past is accepted.
    fn try_from(form: TripForm) -> Result<Self> {
        if form.destination.is_empty() {
            return Err(AgentError::Validation(
                "destination is required".to_string(),
            ));
        }

        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&form.duration_days) {
            return Err(AgentError::Validation(format!(
                "duration must be between {} and {} days, got {}",
                MIN_DURATION_DAYS, MAX_DURATION_DAYS, form.duration_days
            )));
        }

        if form.travelers < MIN_TRAVELERS {
            return Err(AgentError::Validation(format!(
                "at least {} traveler is required",
                MIN_TRAVELERS
            )));
        }

        let mut interests: Vec<Interest> = Vec::with_capacity(form.interests.len());
        for interest in form.interests {
            if !interests.contains(&interest) {
                interests.push(interest);
            }
        }

        Ok(Self {
            destination: form.destination,
            start_date: form.start_date,
            duration_days: form.duration_days,
            budget: form.budget,
            travelers: form.travelers,
            interests,
            additional_info: form.additional_info,
        })
    }
}

impl TripRequest {
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn budget(&self) -> BudgetTier {
        self.budget
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    /// Interests in the order they were picked, without duplicates
    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    /// Comma-joined interest labels; empty when none were picked
    pub fn interests_list(&self) -> String {
        self.interests
            .iter()
            .map(Interest::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
