use std::sync::Arc;

use crate::recent::CityRecencyReader;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryOutputData {
    /// Most recent first.
    pub cities: Vec<String>,
}

pub trait HistoryInputBoundary: Send + Sync {
    fn execute(&self);
    fn switch_to_home_view(&self);
}

pub trait HistoryOutputBoundary: Send + Sync {
    fn prepare_success_view(&self, output: HistoryOutputData);
    fn prepare_fail_view(&self, message: String);
    fn switch_to_home_view(&self);
}

pub struct HistoryInteractor {
    recent: Arc<dyn CityRecencyReader>,
    presenter: Arc<dyn HistoryOutputBoundary>,
}

impl HistoryInteractor {
    pub fn new(
        recent: Arc<dyn CityRecencyReader>,
        presenter: Arc<dyn HistoryOutputBoundary>,
    ) -> Self {
        Self { recent, presenter }
    }
}

impl HistoryInputBoundary for HistoryInteractor {
    fn execute(&self) {
        match self.recent.recent_cities() {
            Ok(cities) => self.presenter.prepare_success_view(HistoryOutputData { cities }),
            Err(err) => {
                tracing::error!("Could not load history: {err}");
                self.presenter.prepare_fail_view(err.to_string());
            }
        }
    }

    fn switch_to_home_view(&self) {
        self.presenter.switch_to_home_view();
    }
}
