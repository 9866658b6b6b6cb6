use std::sync::Arc;

use crate::{
    use_case::{HomeOutputData, SummarizationOutputBoundary, SummarizationOutputData},
    view::{Navigator, ViewModel},
};

use super::ViewModels;

#[derive(Debug)]
pub struct SummarizationPresenter {
    view_model: Arc<ViewModel<SummarizationOutputData>>,
    navigator: Navigator,
    home: Arc<ViewModel<HomeOutputData>>,
}

impl SummarizationPresenter {
    pub fn new(views: &ViewModels) -> Self {
        Self {
            view_model: views.summarization.clone(),
            navigator: Navigator::new(views.active.clone()),
            home: views.home.clone(),
        }
    }
}

impl SummarizationOutputBoundary for SummarizationPresenter {
    fn prepare_success_view(&self, output: SummarizationOutputData) {
        self.view_model.show(output);
    }

    fn prepare_fail_view(&self, message: String) {
        self.view_model.show_failure(message);
    }

    fn switch_to_home_view(&self) {
        self.navigator.switch_to(self.home.as_ref());
    }
}
