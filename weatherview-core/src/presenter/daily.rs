use std::sync::Arc;

use crate::{
    use_case::{DailyOutputBoundary, DailyOutputData, HomeOutputData},
    view::{Navigator, ViewModel},
};

use super::ViewModels;

#[derive(Debug)]
pub struct DailyPresenter {
    view_model: Arc<ViewModel<DailyOutputData>>,
    navigator: Navigator,
    home: Arc<ViewModel<HomeOutputData>>,
}

impl DailyPresenter {
    pub fn new(views: &ViewModels) -> Self {
        Self {
            view_model: views.daily.clone(),
            navigator: Navigator::new(views.active.clone()),
            home: views.home.clone(),
        }
    }
}

impl DailyOutputBoundary for DailyPresenter {
    fn prepare_success_view(&self, output: DailyOutputData) {
        self.view_model.show(output);
    }

    fn prepare_fail_view(&self, message: String) {
        self.view_model.show_failure(message);
    }

    fn switch_to_home_view(&self) {
        self.navigator.switch_to(self.home.as_ref());
    }
}
