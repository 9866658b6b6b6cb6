use std::sync::Arc;

use crate::{
    use_case::{HomeOutputData, HourlyOutputBoundary, HourlyOutputData},
    view::{Navigator, ViewModel},
};

use super::ViewModels;

#[derive(Debug)]
pub struct HourlyPresenter {
    view_model: Arc<ViewModel<HourlyOutputData>>,
    navigator: Navigator,
    home: Arc<ViewModel<HomeOutputData>>,
}

impl HourlyPresenter {
    pub fn new(views: &ViewModels) -> Self {
        Self {
            view_model: views.hourly.clone(),
            navigator: Navigator::new(views.active.clone()),
            home: views.home.clone(),
        }
    }
}

impl HourlyOutputBoundary for HourlyPresenter {
    fn prepare_success_view(&self, output: HourlyOutputData) {
        self.view_model.show(output);
    }

    fn prepare_fail_view(&self, message: String) {
        self.view_model.show_failure(message);
    }

    fn switch_to_home_view(&self) {
        self.navigator.switch_to(self.home.as_ref());
    }
}
