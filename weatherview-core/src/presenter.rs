//! Output boundary implementations.
//!
//! A presenter writes only its own view's state. View switches go through
//! the shared [`Navigator`](crate::view::Navigator).

use std::sync::Arc;

use crate::{
    use_case::{
        DailyOutputData, HistoryOutputData, HomeOutputData, HourlyOutputData,
        SummarizationOutputData,
    },
    view::{ActiveView, ViewModel, ViewName},
};

pub mod daily;
pub mod history;
pub mod home;
pub mod hourly;
pub mod summarization;

pub use daily::DailyPresenter;
pub use history::HistoryPresenter;
pub use home::HomePresenter;
pub use hourly::HourlyPresenter;
pub use summarization::SummarizationPresenter;

/// Every view's state plus the active view name, shared between the
/// presenters and whatever renders them.
#[derive(Debug, Clone)]
pub struct ViewModels {
    pub active: Arc<ActiveView>,
    pub home: Arc<ViewModel<HomeOutputData>>,
    pub daily: Arc<ViewModel<DailyOutputData>>,
    pub hourly: Arc<ViewModel<HourlyOutputData>>,
    pub summarization: Arc<ViewModel<SummarizationOutputData>>,
    pub history: Arc<ViewModel<HistoryOutputData>>,
    /// Holds no data; it only exists to be switched to.
    pub checker: Arc<ViewModel<()>>,
}

impl ViewModels {
    pub fn new() -> Self {
        Self {
            active: Arc::new(ActiveView::new(ViewName::Home)),
            home: Arc::new(ViewModel::new(ViewName::Home)),
            daily: Arc::new(ViewModel::new(ViewName::Daily)),
            hourly: Arc::new(ViewModel::new(ViewName::Hourly)),
            summarization: Arc::new(ViewModel::new(ViewName::Summarization)),
            history: Arc::new(ViewModel::new(ViewName::History)),
            checker: Arc::new(ViewModel::new(ViewName::Checker)),
        }
    }
}

impl Default for ViewModels {
    fn default() -> Self {
        Self::new()
    }
}
