use std::sync::Arc;

use crate::{
    use_case::{
        DailyOutputData, HistoryOutputData, HomeOutputBoundary, HomeOutputData, HourlyOutputData,
        SummarizationOutputData,
    },
    view::{Navigator, ViewModel},
};

use super::ViewModels;

#[derive(Debug)]
pub struct HomePresenter {
    view_model: Arc<ViewModel<HomeOutputData>>,
    navigator: Navigator,
    daily: Arc<ViewModel<DailyOutputData>>,
    hourly: Arc<ViewModel<HourlyOutputData>>,
    checker: Arc<ViewModel<()>>,
    summarization: Arc<ViewModel<SummarizationOutputData>>,
    history: Arc<ViewModel<HistoryOutputData>>,
}

impl HomePresenter {
    pub fn new(views: &ViewModels) -> Self {
        Self {
            view_model: views.home.clone(),
            navigator: Navigator::new(views.active.clone()),
            daily: views.daily.clone(),
            hourly: views.hourly.clone(),
            checker: views.checker.clone(),
            summarization: views.summarization.clone(),
            history: views.history.clone(),
        }
    }
}

impl HomeOutputBoundary for HomePresenter {
    fn prepare_success_view(&self, output: HomeOutputData) {
        self.view_model.show(output);
    }

    fn prepare_fail_view(&self, message: String) {
        self.view_model.show_failure(message);
    }

    fn switch_to_daily_view(&self) {
        self.navigator.switch_to(self.daily.as_ref());
    }

    fn switch_to_hourly_view(&self) {
        self.navigator.switch_to(self.hourly.as_ref());
    }

    fn switch_to_checker_view(&self) {
        self.navigator.switch_to(self.checker.as_ref());
    }

    fn switch_to_summary_view(&self) {
        self.navigator.switch_to(self.summarization.as_ref());
    }

    fn switch_to_history_view(&self) {
        self.navigator.switch_to(self.history.as_ref());
    }
}
