use anyhow::{Context, Result, bail};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use weatherview_core::{
    App, Config, JsonFileStore, Notification, ProviderId, SystemClock, ViewModel, ViewName,
    ViewState, forecast, format,
    provider::default_provider_from_config,
    use_case::{DailyInputData, HomeInputData, HourlyInputData, SummarizationInputData},
    view::{Navigator, SubscriptionId},
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Weather for your recently viewed cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "weatherapi".
        provider: String,
    },

    /// Show current weather for a city and remember it as the most recent one.
    Show {
        /// City name.
        city: String,
    },

    /// Seven-day forecast for the most recent city.
    Daily {
        /// Weekday to show details for, e.g. "monday". Defaults to today.
        #[arg(long)]
        weekday: Option<String>,
    },

    /// Hour-by-hour forecast.
    Hourly {
        /// City name. Defaults to the most recent city.
        #[arg(long)]
        city: Option<String>,

        /// Hours from now to show details for. Defaults to the current hour.
        #[arg(long)]
        hour: Option<usize>,
    },

    /// Current conditions with clothing advice.
    Summary {
        /// City name. Defaults to the most recent city.
        #[arg(long)]
        city: Option<String>,
    },

    /// List recently viewed cities, most recent first.
    History,

    /// Move between views interactively.
    Browse,
}

impl Cli {
    pub async fn run(self, mut config: Config) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&mut config, &provider),
            Command::Show { city } => {
                let app = build_app(&config)?;
                app.home.execute(HomeInputData::new(city)).await;
                print_state(&app.views.home.state(), render::home)
            }
            Command::Daily { weekday } => {
                let app = build_app(&config)?;
                app.daily.execute(DailyInputData { weekday }).await;
                print_state(&app.views.daily.state(), render::daily)
            }
            Command::Hourly { city, hour } => {
                let app = build_app(&config)?;
                app.hourly.execute(HourlyInputData { city, hour }).await;
                print_state(&app.views.hourly.state(), render::hourly)
            }
            Command::Summary { city } => {
                let app = build_app(&config)?;
                app.summarization.execute(SummarizationInputData { city }).await;
                print_state(&app.views.summarization.state(), render::summarization)
            }
            Command::History => {
                let app = build_app(&config)?;
                app.history.execute();
                print_state(&app.views.history.state(), render::history)
            }
            Command::Browse => browse(&build_app(&config)?).await,
        }
    }
}

fn configure(config: &mut Config, provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    if config.is_provider_configured(id) {
        println!("An API key for {id} is already stored; entering a new one replaces it.");
    }

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(id, api_key.to_string());
    config.save()?;

    tracing::info!("Stored API key for {id}");
    println!("Saved API key for {id} to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_app(config: &Config) -> Result<App> {
    let provider = default_provider_from_config(config)?;
    let store = JsonFileStore::new(config.recent_cities_file_path()?);
    tracing::debug!("Using recent cities file {}", store.path().display());

    Ok(App::new(provider, store, Arc::new(SystemClock)))
}

/// Print the rendered state, or fail with its message.
fn print_state<T>(state: &ViewState<T>, show: fn(&ViewState<T>) -> String) -> Result<()> {
    if let Some(message) = state.error() {
        bail!("{message}");
    }
    println!("{}", show(state));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    LookUp,
    Daily,
    Hourly,
    Summary,
    History,
    Checker,
    PickWeekday,
    PickHour,
    Home,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::LookUp => "Look up a city",
            Action::Daily => "Daily forecast",
            Action::Hourly => "Hourly forecast",
            Action::Summary => "Summary",
            Action::History => "Recently viewed",
            Action::Checker => "Checker",
            Action::PickWeekday => "Pick a weekday",
            Action::PickHour => "Pick an hour",
            Action::Home => "Back to home",
            Action::Quit => "Quit",
        })
    }
}

fn actions(view: ViewName) -> Vec<Action> {
    match view {
        ViewName::Home => vec![
            Action::LookUp,
            Action::Daily,
            Action::Hourly,
            Action::Summary,
            Action::History,
            Action::Checker,
            Action::Quit,
        ],
        ViewName::Daily => vec![Action::PickWeekday, Action::Home, Action::Quit],
        ViewName::Hourly => vec![Action::PickHour, Action::Home, Action::Quit],
        ViewName::Summarization | ViewName::History | ViewName::Checker => {
            vec![Action::Home, Action::Quit]
        }
    }
}

/// `Ok(None)` when the user backed out of the prompt.
fn answer<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

type RefreshQueue = Arc<Mutex<Vec<ViewName>>>;

fn queue_refreshes<T>(model: &ViewModel<T>, queue: &RefreshQueue) -> SubscriptionId
where
    T: Clone + Send + Sync + 'static,
{
    let name = model.name();
    let queue = queue.clone();
    model.subscribe(move |notification| {
        if matches!(notification, Notification::RefreshRequested) {
            queue.lock().push(name);
        }
    })
}

async fn refresh(app: &App, view: ViewName) {
    tracing::debug!("Refreshing {view} view");
    match view {
        ViewName::Home => app.home.execute_default().await,
        ViewName::Daily => app.daily.execute_default().await,
        ViewName::Hourly => app.hourly.execute_default().await,
        ViewName::Summarization => app.summarization.execute_default().await,
        ViewName::History => app.history.execute(),
        ViewName::Checker => {}
    }
}

fn render_active(app: &App, view: ViewName) -> String {
    let views = &app.views;
    match view {
        ViewName::Home => render::home(&views.home.state()),
        ViewName::Daily => render::daily(&views.daily.state()),
        ViewName::Hourly => render::hourly(&views.hourly.state()),
        ViewName::Summarization => render::summarization(&views.summarization.state()),
        ViewName::History => render::history(&views.history.state()),
        ViewName::Checker => render::checker(),
    }
}

fn weekday_choices(app: &App) -> Vec<String> {
    match app.views.daily.state().data() {
        Some(daily) => daily.weekdays.clone(),
        None => forecast::rotated_weekdays(Weekday::Mon)
            .iter()
            .map(|day| format::weekday(*day).to_string())
            .collect(),
    }
}

async fn browse(app: &App) -> Result<()> {
    let queue = RefreshQueue::default();
    let views = &app.views;
    let subscriptions = [
        (ViewName::Home, queue_refreshes(&views.home, &queue)),
        (ViewName::Daily, queue_refreshes(&views.daily, &queue)),
        (ViewName::Hourly, queue_refreshes(&views.hourly, &queue)),
        (ViewName::Summarization, queue_refreshes(&views.summarization, &queue)),
        (ViewName::History, queue_refreshes(&views.history, &queue)),
    ];

    app.home.execute_default().await;

    loop {
        let active = views.active.get();
        println!("\n[{active}]\n{}", render_active(app, active));

        let Some(action) = answer(Select::new("What next?", actions(active)).prompt())? else {
            break;
        };

        match action {
            Action::Quit => break,
            Action::LookUp => {
                if let Some(city) = answer(Text::new("City:").prompt())? {
                    app.home.execute(HomeInputData::new(city)).await;
                }
            }
            Action::Daily => app.home.switch_to_daily_view(),
            Action::Hourly => app.home.switch_to_hourly_view(),
            Action::Summary => app.home.switch_to_summary_view(),
            Action::History => app.home.switch_to_history_view(),
            Action::Checker => app.home.switch_to_checker_view(),
            Action::PickWeekday => {
                let choices = weekday_choices(app);
                if let Some(weekday) = answer(Select::new("Weekday:", choices).prompt())? {
                    app.daily.execute(DailyInputData::weekday(weekday)).await;
                }
            }
            Action::PickHour => {
                let prompt = CustomType::<usize>::new("Hours from now:")
                    .with_error_message("Please enter a whole number of hours");
                if let Some(hour) = answer(prompt.prompt())? {
                    app.hourly.execute(HourlyInputData { city: None, hour: Some(hour) }).await;
                }
            }
            Action::Home => match active {
                ViewName::Daily => app.daily.switch_to_home_view(),
                ViewName::Hourly => app.hourly.switch_to_home_view(),
                ViewName::Summarization => app.summarization.switch_to_home_view(),
                ViewName::History => app.history.switch_to_home_view(),
                ViewName::Home | ViewName::Checker => {
                    Navigator::new(views.active.clone()).switch_to(views.home.as_ref())
                }
            },
        }

        let pending: Vec<ViewName> = queue.lock().drain(..).collect();
        for view in pending {
            refresh(app, view).await;
        }
    }

    for (view, id) in subscriptions {
        let removed = match view {
            ViewName::Home => views.home.unsubscribe(id),
            ViewName::Daily => views.daily.unsubscribe(id),
            ViewName::Hourly => views.hourly.unsubscribe(id),
            ViewName::Summarization => views.summarization.unsubscribe(id),
            ViewName::History => views.history.unsubscribe(id),
            ViewName::Checker => false,
        };
        tracing::debug!("Unsubscribed from {view} view: {removed}");
    }

    Ok(())
}
