use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use nutriflow_app_lib::commands::{
    self, AppState, CommandError, CommandResult,
};
use nutriflow_app_lib::error::AppError;
use nutriflow_app_lib::models::activity::{ActivityUpdate, Intensity};
use nutriflow_app_lib::models::meal::MealPatch;
use nutriflow_app_lib::models::profile::{Goal, ProfileUpdate, Sex};
use nutriflow_app_lib::utils::logger;

#[derive(Parser)]
#[command(name = "nutriflow")]
#[command(about = "Client NutriFlow: repas, activités et bilans quotidiens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vue d'ensemble du jour (profil, résumé, calories restantes)
    Dashboard {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Résumé nutritionnel brut du jour
    Summary {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Bilan enrichi: balance, écarts macros, contexte métabolique
    Insight {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Indicateur de complétude d'une journée
    Status {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Indicateurs de complétude sur une plage de dates
    Calendar {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Historique des bilans journaliers
    History {
        #[arg(long, default_value_t = 30)]
        limit: u32,
    },
    /// Recommandations nutritionnelles basées sur l'historique
    Recommendations {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Gestion des repas
    Meals {
        #[command(subcommand)]
        action: MealAction,
    },
    /// Gestion des activités sportives
    Activities {
        #[command(subcommand)]
        action: ActivityAction,
    },
    /// Activités sportives reconnues par l'analyseur
    Sports,
    /// Correspondance des unités françaises vers l'anglais
    Units,
    /// Scanner un code-barres et journaliser le produit
    Scan {
        barcode: String,
        #[arg(long, default_value_t = 100.0)]
        quantity: f64,
        #[arg(long, default_value = "dejeuner")]
        meal_type: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Fiche produit enrichie
    Product { barcode: String },
    /// Recherche d'un produit par terme
    Search { query: String },
    /// Profil utilisateur
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Objectifs calories et macros personnalisés
    Goals,
}

#[derive(Subcommand)]
enum MealAction {
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Analyse une description en français et journalise le repas
    Log {
        query: String,
        #[arg(long, default_value = "dejeuner")]
        meal_type: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Applique un patch JSON (listes add/update/delete) au repas
    Edit {
        meal_id: String,
        #[arg(long)]
        patch: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Remove {
        meal_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    RemoveItem {
        item_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum ActivityAction {
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Estimation sans enregistrement
    Estimate {
        activity: String,
        #[arg(long)]
        duration: f64,
        #[arg(long, default_value = "moderate", value_parser = parse_intensity)]
        intensity: Intensity,
    },
    /// Analyse et enregistre l'activité
    Add {
        activity: String,
        #[arg(long)]
        duration: f64,
        #[arg(long, default_value = "moderate", value_parser = parse_intensity)]
        intensity: Intensity,
    },
    Update {
        activity_id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        duration: Option<f64>,
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long, value_parser = parse_intensity)]
        intensity: Option<Intensity>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Remove {
        activity_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Durée et intensité mémorisées pour une activité
    Prefill { activity: String },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long, value_parser = parse_sex)]
        sex: Option<Sex>,
        #[arg(long)]
        activity_factor: Option<f64>,
        #[arg(long, value_parser = parse_goal)]
        goal: Option<Goal>,
    },
}

fn parse_intensity(value: &str) -> Result<Intensity, String> {
    value.parse::<Intensity>().map_err(|err| err.to_string())
}

fn parse_sex(value: &str) -> Result<Sex, String> {
    match value {
        "male" | "homme" => Ok(Sex::Male),
        "female" | "femme" => Ok(Sex::Female),
        other => Err(format!(
            "Sexe inconnu: {other} (attendu: male, female, homme ou femme)"
        )),
    }
}

fn parse_goal(value: &str) -> Result<Goal, String> {
    match value {
        "perte" | "loss" => Ok(Goal::Loss),
        "maintien" | "maintenance" => Ok(Goal::Maintenance),
        "prise" | "gain" => Ok(Goal::Gain),
        other => Err(format!(
            "Objectif inconnu: {other} (attendu: perte, maintien ou prise)"
        )),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn render<T: Serialize>(value: &T) -> CommandResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CommandError::from(AppError::Serialization(err)))
}

async fn run(state: &AppState, command: Commands) -> CommandResult<String> {
    match command {
        Commands::Dashboard { date } => {
            let data =
                commands::dashboard::dashboard_overview(state, date.unwrap_or_else(today)).await?;
            render(&data)
        }
        Commands::Summary { date } => {
            let summary =
                commands::summary::summary_get(state, date.unwrap_or_else(today)).await?;
            render(&summary)
        }
        Commands::Insight { date } => {
            let insight =
                commands::summary::insight_get(state, date.unwrap_or_else(today)).await?;
            render(&insight)
        }
        Commands::Status { date } => {
            let date = date.unwrap_or_else(today);
            let status = commands::summary::day_status_get(state, date).await?;
            render(&commands::summary::DayStatusEntry { date, status })
        }
        Commands::Calendar { from, to } => {
            let statuses = commands::summary::day_statuses_get(state, from, to).await?;
            render(&statuses)
        }
        Commands::History { limit } => {
            let history = commands::summary::history_get(state, limit).await?;
            render(&history)
        }
        Commands::Recommendations { days } => {
            let report = commands::summary::recommendations_get(state, days).await?;
            render(&report)
        }
        Commands::Meals { action } => match action {
            MealAction::List { date } => {
                let meals = commands::meal::meals_list(state, date.unwrap_or_else(today)).await?;
                render(&meals)
            }
            MealAction::Log {
                query,
                meal_type,
                date,
            } => {
                let analysis = commands::meal::meal_log(state, &query, &meal_type, date).await?;
                render(&analysis)
            }
            MealAction::Edit {
                meal_id,
                patch,
                date,
            } => {
                let patch: MealPatch = serde_json::from_str(&patch).map_err(|err| {
                    CommandError::from(AppError::validation(format!(
                        "Patch JSON invalide: {err}"
                    )))
                })?;
                let meal = commands::meal::meal_edit(
                    state,
                    &meal_id,
                    &patch,
                    date.unwrap_or_else(today),
                )
                .await?;
                render(&meal)
            }
            MealAction::Remove { meal_id, date } => {
                commands::meal::meal_delete(state, &meal_id, date.unwrap_or_else(today)).await?;
                render(&serde_json::json!({ "deleted": meal_id }))
            }
            MealAction::RemoveItem { item_id, date } => {
                commands::meal::meal_item_delete(state, &item_id, date.unwrap_or_else(today))
                    .await?;
                render(&serde_json::json!({ "deleted": item_id }))
            }
        },
        Commands::Activities { action } => match action {
            ActivityAction::List { date } => {
                let activities =
                    commands::activity::activities_list(state, date.unwrap_or_else(today)).await?;
                render(&activities)
            }
            ActivityAction::Estimate {
                activity,
                duration,
                intensity,
            } => {
                let estimate =
                    commands::activity::activity_estimate(state, &activity, duration, intensity)
                        .await?;
                render(&estimate)
            }
            ActivityAction::Add {
                activity,
                duration,
                intensity,
            } => {
                let logged =
                    commands::activity::activity_log(state, &activity, duration, intensity)
                        .await?;
                render(&logged)
            }
            ActivityAction::Update {
                activity_id,
                description,
                duration,
                calories,
                intensity,
                date,
            } => {
                let update = ActivityUpdate {
                    description,
                    duration_min: duration,
                    calories_burned: calories,
                    intensity,
                };
                let activity = commands::activity::activity_update(
                    state,
                    &activity_id,
                    &update,
                    date.unwrap_or_else(today),
                )
                .await?;
                render(&activity)
            }
            ActivityAction::Remove { activity_id, date } => {
                commands::activity::activity_delete(
                    state,
                    &activity_id,
                    date.unwrap_or_else(today),
                )
                .await?;
                render(&serde_json::json!({ "deleted": activity_id }))
            }
            ActivityAction::Prefill { activity } => {
                let prefill = commands::activity::activity_prefill(state, &activity).await?;
                render(&prefill)
            }
        },
        Commands::Sports => {
            let sports = commands::activity::sports_list(state).await?;
            render(&sports)
        }
        Commands::Units => {
            let units = commands::profile::units_get(state).await?;
            render(&units)
        }
        Commands::Scan {
            barcode,
            quantity,
            meal_type,
            date,
        } => {
            let result =
                commands::product::product_scan(state, &barcode, quantity, &meal_type, date)
                    .await?;
            render(&result)
        }
        Commands::Product { barcode } => {
            let details = commands::product::product_details_get(state, &barcode).await?;
            render(&details)
        }
        Commands::Search { query } => {
            let product = commands::product::product_search(state, &query).await?;
            render(&product)
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show => {
                let profile = commands::profile::profile_get(state).await?;
                render(&profile)
            }
            ProfileAction::Update {
                weight,
                height,
                age,
                sex,
                activity_factor,
                goal,
            } => {
                let update = ProfileUpdate {
                    weight_kg: weight,
                    height_cm: height,
                    age,
                    sex,
                    activity_factor,
                    goal,
                };
                let profile = commands::profile::profile_update(state, &update).await?;
                render(&profile)
            }
        },
        Commands::Goals => {
            let goals = commands::profile::goals_get(state).await?;
            render(&goals)
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = logger::init_logging() {
        eprintln!("Avertissement: journalisation indisponible ({err})");
    }

    let state = match AppState::from_env() {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Erreur: {err}");
            std::process::exit(1);
        }
    };

    match run(&state, cli.command).await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Erreur: {}", err.message);
            std::process::exit(1);
        }
    }
}
