use std::sync::Arc;

use crate::{
    use_case::{HistoryOutputBoundary, HistoryOutputData, HomeOutputData},
    view::{Navigator, ViewModel, ViewState},
};

use super::ViewModels;

#[derive(Debug)]
pub struct HistoryPresenter {
    view_model: Arc<ViewModel<HistoryOutputData>>,
    navigator: Navigator,
    home: Arc<ViewModel<HomeOutputData>>,
}

impl HistoryPresenter {
    pub fn new(views: &ViewModels) -> Self {
        Self {
            view_model: views.history.clone(),
            navigator: Navigator::new(views.active.clone()),
            home: views.home.clone(),
        }
    }
}

impl HistoryOutputBoundary for HistoryPresenter {
    fn prepare_success_view(&self, output: HistoryOutputData) {
        self.view_model.show(output);
    }

    fn prepare_fail_view(&self, message: String) {
        self.view_model.show_failure(message);
    }

    fn switch_to_home_view(&self) {
        self.navigator.switch_to(self.home.as_ref());
    }
}

impl ViewState<HistoryOutputData> {
    /// Lines to list: the cities, or the failure message on its own.
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            ViewState::Empty => Vec::new(),
            ViewState::Populated(history) => history.cities.clone(),
            ViewState::Failed(message) => vec![message.clone()],
        }
    }
}
