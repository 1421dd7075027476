use crate::types::{
    trip::{MAX_DURATION_DAYS, MIN_DURATION_DAYS, MIN_TRAVELERS},
    BudgetBreakdown, BudgetTier, Interest, TripForm,
};
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, MultiSelect, Select};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fill the trip form on the terminal, starting from `defaults`
pub fn prompt_trip_form(defaults: TripForm) -> Result<TripForm> {
    let destination: String = Input::new()
        .with_prompt("Where do you want to go?")
        .with_initial_text(defaults.destination.clone())
        .interact_text()?;

    let start_date: String = Input::new()
        .with_prompt("Start Date (YYYY-MM-DD)")
        .default(defaults.start_date.format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    let start_date = NaiveDate::parse_from_str(&start_date, DATE_FORMAT)?;

    let duration_days: u32 = Input::new()
        .with_prompt("Duration (days)")
        .default(defaults.duration_days)
        .validate_with(|days: &u32| -> std::result::Result<(), String> {
            if (MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(days) {
                Ok(())
            } else {
                Err(format!(
                    "must be between {} and {}",
                    MIN_DURATION_DAYS, MAX_DURATION_DAYS
                ))
            }
        })
        .interact_text()?;

    let tiers: Vec<&str> = BudgetTier::ALL.iter().map(|tier| tier.label()).collect();
    let current = BudgetTier::ALL
        .iter()
        .position(|tier| *tier == defaults.budget)
        .unwrap_or(0);
    let budget = BudgetTier::ALL[Select::new()
        .with_prompt("Budget Range")
        .items(&tiers)
        .default(current)
        .interact()?];

    let travelers: u32 = Input::new()
        .with_prompt("Number of Travelers")
        .default(defaults.travelers)
        .validate_with(|count: &u32| -> std::result::Result<(), String> {
            if *count >= MIN_TRAVELERS {
                Ok(())
            } else {
                Err(format!("must be at least {}", MIN_TRAVELERS))
            }
        })
        .interact_text()?;

    let labels: Vec<&str> = Interest::ALL.iter().map(|interest| interest.label()).collect();
    let checked: Vec<bool> = Interest::ALL
        .iter()
        .map(|interest| defaults.interests.contains(interest))
        .collect();
    let interests = MultiSelect::new()
        .with_prompt("Interests (space to toggle)")
        .items(&labels)
        .defaults(&checked)
        .interact()?
        .into_iter()
        .map(|idx| Interest::ALL[idx])
        .collect();

    let additional_info: String = Input::new()
        .with_prompt("Any additional preferences or requirements?")
        .with_initial_text(defaults.additional_info.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(TripForm {
        destination,
        start_date,
        duration_days,
        budget,
        travelers,
        interests,
        additional_info,
    })
}

/// Ask for the four sub-budgets of the calculator
pub fn prompt_budget() -> Result<BudgetBreakdown> {
    let amount = |label: &str| -> Result<f64> {
        let value: f64 = Input::new()
            .with_prompt(format!("{} Budget", label))
            .default(0.0)
            .validate_with(|value: &f64| -> std::result::Result<(), &'static str> {
                if value.is_finite() && *value >= 0.0 {
                    Ok(())
                } else {
                    Err("must be a non-negative amount")
                }
            })
            .interact_text()?;
        Ok(value)
    };

    Ok(BudgetBreakdown::new(
        amount("Accommodation")?,
        amount("Transportation")?,
        amount("Activities")?,
        amount("Food")?,
    )?)
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Free-text feedback; `None` when the user leaves it blank
pub fn prompt_feedback() -> Result<Option<String>> {
    let feedback: String = Input::new()
        .with_prompt("Share your feedback about this travel plan")
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(feedback).filter(|text| !text.trim().is_empty()))
}
