//! Observable per-view state.
//!
//! Every view owns one [`ViewModel`]. Presenters are the only writers; the
//! UI subscribes and re-renders from the snapshots it is handed. Delivery is
//! synchronous and follows subscription order.

use parking_lot::{Mutex, RwLock};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Identity of a view, used to route view switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    Home,
    Daily,
    Hourly,
    Summarization,
    History,
    Checker,
}

impl ViewName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Home => "home",
            ViewName::Daily => "daily",
            ViewName::Hourly => "hourly",
            ViewName::Summarization => "summarization",
            ViewName::History => "history",
            ViewName::Checker => "checker",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a subscriber is told.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<S> {
    /// The state changed; carries a snapshot of the new state.
    Changed(S),
    /// The view is about to become visible and should re-pull its data.
    RefreshRequested,
}

pub type SubscriptionId = u64;

type Listener<S> = Arc<dyn Fn(&Notification<S>) + Send + Sync>;

/// A value plus an ordered list of listeners.
pub struct Observable<S> {
    state: RwLock<S>,
    listeners: Mutex<Vec<(SubscriptionId, Listener<S>)>>,
    next_id: AtomicU64,
}

impl<S: Clone> Observable<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: RwLock::new(initial),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn get(&self) -> S {
        self.state.read().clone()
    }

    /// Replace the state without notifying anyone.
    pub fn set(&self, state: S) {
        *self.state.write() = state;
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&Notification<S>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Deliver the current state to every subscriber.
    pub fn notify(&self) {
        self.deliver(&Notification::Changed(self.get()));
    }

    pub fn request_refresh(&self) {
        self.deliver(&Notification::RefreshRequested);
    }

    fn deliver(&self, notification: &Notification<S>) {
        // Listeners may subscribe or read state re-entrantly; call them unlocked.
        let listeners: Vec<Listener<S>> =
            self.listeners.lock().iter().map(|(_, listener)| listener.clone()).collect();

        for listener in listeners {
            listener(notification);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Observable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("state", &*self.state.read())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

/// Display state of one view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Empty,
    Populated(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Populated(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The observable state of one named view.
#[derive(Debug)]
pub struct ViewModel<T> {
    name: ViewName,
    state: Observable<ViewState<T>>,
}

impl<T: Clone> ViewModel<T> {
    pub fn new(name: ViewName) -> Self {
        Self { name, state: Observable::new(ViewState::Empty) }
    }

    pub fn name(&self) -> ViewName {
        self.name
    }

    pub fn state(&self) -> ViewState<T> {
        self.state.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&Notification<ViewState<T>>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub(crate) fn show(&self, data: T) {
        self.state.set(ViewState::Populated(data));
        self.state.notify();
    }

    pub(crate) fn show_failure(&self, message: impl Into<String>) {
        self.state.set(ViewState::Failed(message.into()));
        self.state.notify();
    }
}

/// A view that can be asked to refresh before it is shown.
pub trait SwitchTarget: Send + Sync {
    fn view_name(&self) -> ViewName;
    fn request_refresh(&self);
}

impl<T: Clone + Send + Sync> SwitchTarget for ViewModel<T> {
    fn view_name(&self) -> ViewName {
        self.name
    }

    fn request_refresh(&self) {
        tracing::debug!("Requesting refresh of {} view", self.name);
        self.state.request_refresh();
    }
}

/// Name of the currently visible view. Only [`Navigator`] writes it.
pub type ActiveView = Observable<ViewName>;

/// Performs view switches on behalf of presenters.
#[derive(Debug, Clone)]
pub struct Navigator {
    active: Arc<ActiveView>,
}

impl Navigator {
    pub fn new(active: Arc<ActiveView>) -> Self {
        Self { active }
    }

    /// Tell `target` to refresh, then make it the active view. The refresh
    /// signal always lands first so the target never shows stale data.
    pub fn switch_to(&self, target: &dyn SwitchTarget) {
        let name = target.view_name();
        target.request_refresh();

        self.active.set(name);
        self.active.notify();
        tracing::info!("Switched to {name} view");
    }
}
