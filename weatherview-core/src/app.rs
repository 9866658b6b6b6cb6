use std::sync::Arc;

use crate::{
    clock::Clock,
    presenter::{
        DailyPresenter, HistoryPresenter, HomePresenter, HourlyPresenter, SummarizationPresenter,
        ViewModels,
    },
    provider::WeatherProvider,
    recent::{RecencyStore, RecentCityRegistry},
    use_case::{
        DailyInputBoundary, DailyInteractor, HistoryInputBoundary, HistoryInteractor,
        HomeInputBoundary, HomeInteractor, HourlyInputBoundary, HourlyInteractor,
        SummarizationInputBoundary, SummarizationInteractor,
    },
};

/// The wired application: one interactor per view, each writing into
/// [`App::views`] through its presenter.
pub struct App {
    pub views: ViewModels,
    pub recent: Arc<RecentCityRegistry>,
    pub home: Arc<dyn HomeInputBoundary>,
    pub daily: Arc<dyn DailyInputBoundary>,
    pub hourly: Arc<dyn HourlyInputBoundary>,
    pub summarization: Arc<dyn SummarizationInputBoundary>,
    pub history: Arc<dyn HistoryInputBoundary>,
}

impl App {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: impl RecencyStore + 'static,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let recent = Arc::new(RecentCityRegistry::open(store));
        let views = ViewModels::new();

        let home = HomeInteractor::new(
            provider.clone(),
            recent.clone(),
            recent.clone(),
            clock.clone(),
            Arc::new(HomePresenter::new(&views)),
        );
        let daily = DailyInteractor::new(
            provider.clone(),
            recent.clone(),
            clock.clone(),
            Arc::new(DailyPresenter::new(&views)),
        );
        let hourly = HourlyInteractor::new(
            provider.clone(),
            recent.clone(),
            clock,
            Arc::new(HourlyPresenter::new(&views)),
        );
        let summarization = SummarizationInteractor::new(
            provider,
            recent.clone(),
            Arc::new(SummarizationPresenter::new(&views)),
        );
        let history = HistoryInteractor::new(recent.clone(), Arc::new(HistoryPresenter::new(&views)));

        Self {
            views,
            recent,
            home: Arc::new(home),
            daily: Arc::new(daily),
            hourly: Arc::new(hourly),
            summarization: Arc::new(summarization),
            history: Arc::new(history),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        recent::{CityRecencyReader, JsonFileStore, MemoryStore},
        test_support::{StubProvider, friday_noon_utc},
        use_case::{CITY_NOT_FOUND, DailyOutputData, HomeInputData},
        view::{Notification, ViewName, ViewState},
    };
    use parking_lot::Mutex;

    fn app(cities: &[&str]) -> App {
        App::new(
            Arc::new(StubProvider::with_city("Toronto")),
            MemoryStore::with_cities(cities.iter().copied()),
            Arc::new(friday_noon_utc()),
        )
    }

    fn app_over_corrupt_file() -> (tempfile::TempDir, std::path::PathBuf, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        std::fs::write(&path, "{ broken").unwrap();

        let app = App::new(
            Arc::new(StubProvider::with_city("Toronto")),
            JsonFileStore::new(&path),
            Arc::new(friday_noon_utc()),
        );
        (dir, path, app)
    }

    #[test]
    fn corrupt_recent_file_fails_history_view_only() {
        let (_dir, path, app) = app_over_corrupt_file();

        app.history.execute();

        let expected = format!("Failed To Parse Recent City Data: {}", path.display());
        assert_eq!(app.views.history.state().display_lines(), vec![expected]);
        assert_eq!(app.views.home.state(), ViewState::Empty);
    }

    #[tokio::test]
    async fn corrupt_recent_file_fails_home_lookup_with_its_message() {
        let (_dir, path, app) = app_over_corrupt_file();

        app.home.execute(HomeInputData::new("Toronto")).await;

        let expected = format!("Failed To Parse Recent City Data: {}", path.display());
        assert_eq!(app.views.home.state(), ViewState::Failed(expected));
    }

    #[tokio::test]
    async fn failed_lookup_records_city_and_fails_home_only() {
        let app = app(&["Toronto"]);
        let notifications = Arc::new(Mutex::new(0));

        let counter = notifications.clone();
        app.views.home.subscribe(move |_| *counter.lock() += 1);

        app.home.execute(HomeInputData::new("Nowhere")).await;

        assert_eq!(app.recent.recent_cities().unwrap(), vec!["Nowhere", "Toronto"]);
        assert_eq!(*notifications.lock(), 1);
        assert_eq!(app.views.home.state(), ViewState::Failed(CITY_NOT_FOUND.into()));
        assert_eq!(app.views.daily.state(), ViewState::Empty);
        assert_eq!(app.views.hourly.state(), ViewState::Empty);
        assert_eq!(app.views.summarization.state(), ViewState::Empty);
        assert_eq!(app.views.history.state(), ViewState::Empty);
        assert_eq!(app.views.active.get(), ViewName::Home);
    }

    #[test]
    fn daily_refresh_arrives_before_active_view_changes() {
        let app = app(&["Toronto"]);
        let log = Arc::new(Mutex::new(Vec::new()));

        let sink = log.clone();
        app.views.daily.subscribe(move |notification| {
            if matches!(notification, Notification::RefreshRequested) {
                sink.lock().push("daily:refresh".to_string());
            }
        });
        let sink = log.clone();
        app.views.active.subscribe(move |notification| {
            if let Notification::Changed(name) = notification {
                sink.lock().push(format!("active:{name}"));
            }
        });

        app.home.switch_to_daily_view();

        assert_eq!(*log.lock(), vec!["daily:refresh", "active:daily"]);
    }

    #[tokio::test]
    async fn refresh_signal_can_drive_the_target_interactor() {
        let app = app(&["Toronto"]);
        let pending = Arc::new(Mutex::new(Vec::new()));

        let queue = pending.clone();
        app.views.daily.subscribe(move |notification| {
            if matches!(notification, Notification::RefreshRequested) {
                queue.lock().push(ViewName::Daily);
            }
        });

        app.home.switch_to_daily_view();
        let refreshed: Vec<ViewName> = pending.lock().drain(..).collect();
        assert_eq!(refreshed, vec![ViewName::Daily]);
        app.daily.execute_default().await;

        let state: ViewState<DailyOutputData> = app.views.daily.state();
        assert_eq!(state.data().map(|d| d.selected_weekday.as_str()), Some("Friday"));
    }
}
