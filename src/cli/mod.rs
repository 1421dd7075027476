pub mod form;
pub mod render;

use crate::{
    config::Settings,
    core::TravelTeam,
    session::{write_itinerary, PlanningSession, TripPlanner},
    types::{BudgetBreakdown, BudgetTier, Interest, TripForm},
};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use render::{budget_section, TerminalSurface};
use std::{path::PathBuf, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the travel planner
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let matches = command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("plan", sub)) => plan(sub).await,
        Some(("budget", sub)) => budget(sub),
        _ => bail!("a subcommand is required; try --help"),
    }
}

fn command() -> Command {
    Command::new("travel-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a trip with a team of LLM travel agents")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log agent steps at debug level")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(plan_command())
        .subcommand(budget_command())
}

fn plan_command() -> Command {
    Command::new("plan")
        .about("Build a day-by-day itinerary plus transportation, safety, packing and budget notes")
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .value_name("PLACE")
                .help("Where do you want to go?")
                .required_unless_present("interactive"),
        )
        .arg(
            Arg::new("start-date")
                .short('s')
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip (defaults to today)")
                .value_parser(|s: &str| NaiveDate::parse_from_str(s, form::DATE_FORMAT)),
        )
        .arg(
            Arg::new("duration")
                .short('n')
                .long("duration")
                .value_name("DAYS")
                .help("Trip length in days (1-30)")
                .value_parser(value_parser!(u32).range(1..=30))
                .default_value("7"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("LEVEL")
                .help("Budget, Moderate or Luxury")
                .value_parser(|s: &str| s.parse::<BudgetTier>())
                .default_value("Budget"),
        )
        .arg(
            Arg::new("travelers")
                .short('p')
                .long("travelers")
                .value_name("COUNT")
                .help("Number of travelers")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("2"),
        )
        .arg(
            Arg::new("interest")
                .long("interest")
                .value_name("INTEREST")
                .help("Culture, Food, Nature, Adventure, Shopping or Relaxation (repeatable)")
                .value_parser(|s: &str| s.parse::<Interest>())
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("notes")
                .long("notes")
                .value_name("TEXT")
                .help("Any additional preferences or requirements"),
        )
        .arg(
            Arg::new("interactive")
                .short('I')
                .long("interactive")
                .help("Fill in the trip form, budget calculator and feedback with prompts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Save the itinerary as Markdown in this directory")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model name (or set MODEL env var)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Chat completions base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Per-request timeout in seconds")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("120"),
        )
        .arg(
            Arg::new("max-iterations")
                .short('i')
                .long("max-iterations")
                .value_name("COUNT")
                .help("Maximum model calls per agent run")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("10"),
        )
}

fn budget_command() -> Command {
    let amount = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_name("AMOUNT")
            .help(help)
            .value_parser(value_parser!(f64))
            .default_value("0")
    };

    Command::new("budget")
        .about("Split a manual budget into total, per-person and per-day amounts")
        .arg(amount("accommodation", "Accommodation budget"))
        .arg(amount("transport", "Transportation budget"))
        .arg(amount("activities", "Activities budget"))
        .arg(amount("food", "Food budget"))
        .arg(
            Arg::new("travelers")
                .long("travelers")
                .value_name("COUNT")
                .value_parser(value_parser!(u32))
                .default_value("2"),
        )
        .arg(
            Arg::new("days")
                .long("days")
                .value_name("DAYS")
                .value_parser(value_parser!(u32))
                .default_value("7"),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("travel_planner=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("travel_planner=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn settings_from(matches: &ArgMatches) -> Settings {
    let mut settings = Settings::from_env();
    if let Some(key) = matches.get_one::<String>("api-key") {
        settings.api_key = Some(key.clone());
    }
    if let Some(url) = matches.get_one::<String>("base-url") {
        settings.base_url = url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        settings.model = model.clone();
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        settings.timeout = Duration::from_secs(*seconds);
    }
    if let Some(count) = matches.get_one::<u32>("max-iterations") {
        settings.max_iterations = *count as usize;
    }
    settings
}

fn form_from(matches: &ArgMatches) -> TripForm {
    let defaults = TripForm::default();
    TripForm {
        destination: matches
            .get_one::<String>("destination")
            .cloned()
            .unwrap_or_default(),
        start_date: matches
            .get_one::<NaiveDate>("start-date")
            .copied()
            .unwrap_or(defaults.start_date),
        duration_days: matches
            .get_one::<u32>("duration")
            .copied()
            .unwrap_or(defaults.duration_days),
        budget: matches
            .get_one::<BudgetTier>("budget")
            .copied()
            .unwrap_or(defaults.budget),
        travelers: matches
            .get_one::<u32>("travelers")
            .copied()
            .unwrap_or(defaults.travelers),
        interests: matches
            .get_many::<Interest>("interest")
            .map(|values| values.copied().collect())
            .unwrap_or_default(),
        additional_info: matches
            .get_one::<String>("notes")
            .cloned()
            .unwrap_or_default(),
    }
}

async fn plan(matches: &ArgMatches) -> anyhow::Result<()> {
    let interactive = matches.get_flag("interactive");
    let settings = settings_from(matches);
    let team = TravelTeam::from_settings(&settings).context("could not set up the travel team")?;
    info!(?settings, "settings resolved");

    let mut session = PlanningSession::new();
    let mut trip_form = form_from(matches);
    loop {
        if interactive {
            trip_form = form::prompt_trip_form(trip_form)?;
        }
        match session.submit(trip_form.clone()) {
            Ok(_) => break,
            Err(err) if interactive => eprintln!("❌ {}", err),
            Err(err) => return Err(err).context("invalid trip form"),
        }
    }

    let planner = TripPlanner::new(team);
    let mut surface = TerminalSurface::new();
    if let Err(err) = planner.run(&mut session, &mut surface).await {
        error!(error = %err, code = err.error_code(), "planning failed");
        return Err(err).context("planning failed");
    }

    let (Some(request), Some(itinerary)) = (session.request(), session.master_itinerary()) else {
        bail!("planning finished without an itinerary");
    };

    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        let path = write_itinerary(dir, request, itinerary)
            .with_context(|| format!("could not save the itinerary to {}", dir.display()))?;
        println!("📥 Travel plan saved to {}", path.display());
    }

    if interactive {
        if form::confirm("Open the budget calculator?", false)? {
            let breakdown = form::prompt_budget()?;
            println!("\n{}\n", budget_section(&breakdown.metrics_for(request)));
        }

        println!("\n✨ Help us improve!");
        if let Some(feedback) = form::prompt_feedback()? {
            let ack = session.submit_feedback(&feedback)?;
            println!("{}", ack);
        }
    }

    Ok(())
}

fn budget(matches: &ArgMatches) -> anyhow::Result<()> {
    let amount = |name: &str| matches.get_one::<f64>(name).copied().unwrap_or_default();
    let breakdown = BudgetBreakdown {
        accommodation: amount("accommodation"),
        transport: amount("transport"),
        activities: amount("activities"),
        food: amount("food"),
    };
    let travelers = matches.get_one::<u32>("travelers").copied().unwrap_or(2);
    let days = matches.get_one::<u32>("days").copied().unwrap_or(7);

    let metrics = breakdown.metrics(travelers, days)?;
    println!("{}", budget_section(&metrics));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_plan_flags_fill_the_form() {
        let matches = command()
            .try_get_matches_from([
                "travel-planner",
                "plan",
                "--destination",
                "Paris",
                "--start-date",
                "2026-06-01",
                "--duration",
                "3",
                "--budget",
                "moderate",
                "--interest",
                "culture,food",
                "--interest",
                "nature",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let form = form_from(sub);

        assert_eq!(form.destination, "Paris");
        assert_eq!(form.start_date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(form.duration_days, 3);
        assert_eq!(form.budget, BudgetTier::Moderate);
        assert_eq!(form.travelers, 2);
        assert_eq!(
            form.interests,
            vec![Interest::Culture, Interest::Food, Interest::Nature]
        );
    }

    #[test]
    fn test_plan_rejects_out_of_range_duration() {
        let result = command().try_get_matches_from([
            "travel-planner",
            "plan",
            "--destination",
            "Paris",
            "--duration",
            "31",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_destination_required_without_interactive() {
        assert!(command()
            .try_get_matches_from(["travel-planner", "plan"])
            .is_err());
        assert!(command()
            .try_get_matches_from(["travel-planner", "plan", "--interactive"])
            .is_ok());
    }

    #[test]
    fn test_budget_zero_days_is_an_error() {
        let matches = command()
            .try_get_matches_from(["travel-planner", "budget", "--food", "100", "--days", "0"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert!(budget(sub).is_err());
    }
}
