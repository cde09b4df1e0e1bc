//! # Router — the Proximity state machine
//!
//! [`Controller`] owns everything that outlives a single render: the session
//! store, the user source, the accumulated errors and the last known location.
//! It is driven by [`Msg`]s arriving on one channel (a Dioxus coroutine in the
//! app, direct calls in tests) and publishes a fresh [`ViewState`] through its
//! [`Presenter`] after every change.
//!
//! ## Flows
//!
//! | Flow | Entered when | Shows | Data |
//! |------|--------------|-------|------|
//! | [`Flow::Anonymous`] | no live session | login form | all users |
//! | [`Flow::Identified`] | a live session | logout control | users near the session user |
//!
//! [`refresh`](Controller::refresh) tears the current flow down and builds the
//! right one from the session: it starts a new epoch, clears errors, users and
//! the location, re-saves the session (sliding its expiry) and fetches the
//! flow's users. If the users-near fetch fails the identity is treated as
//! stale: the session is cleared, the anonymous flow is built, and only then is
//! the error shown.
//!
//! ## Epochs
//!
//! Each refresh bumps [`ViewState::epoch`]. The geolocation tracker requests a
//! position once per epoch and tags its answer with it; answers from an older
//! epoch are dropped so a late callback cannot touch a flow that no longer
//! exists.

use store::{
    GeolocationError, Location, ProximityError, Session, SessionStore, UserRecord,
};

use crate::error_panel::ErrorLog;
use crate::source::UserSource;

/// Messages accepted by the router.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// Rebuild the current flow from the session.
    Refresh,
    /// The login form produced a valid candidate.
    Login(UserRecord),
    /// The logout control was used.
    Logout,
    LocationUpdated { epoch: u64, location: Location },
    LocationFailed { epoch: u64, error: GeolocationError },
    /// Anything else worth showing in the error panel.
    Error(ProximityError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Anonymous,
    Identified(UserRecord),
}

impl Flow {
    pub fn current_user(&self) -> Option<&UserRecord> {
        match self {
            Flow::Anonymous => None,
            Flow::Identified(user) => Some(user),
        }
    }
}

/// Everything the UI renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub flow: Flow,
    /// Users to plot, from the current flow's fetch.
    pub users: Vec<UserRecord>,
    pub errors: ErrorLog,
    /// Bumped on every refresh; 0 until the first one.
    pub epoch: u64,
    /// A fetch for the current flow is in flight.
    pub loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            flow: Flow::Anonymous,
            users: Vec::new(),
            errors: ErrorLog::default(),
            epoch: 0,
            loading: true,
        }
    }
}

/// Receives view updates from the controller.
pub trait Presenter {
    fn present(&mut self, view: &ViewState);

    /// Bring the top of the page (and the error panel) into view.
    fn scroll_to_top(&mut self) {}
}

pub struct Controller<S, D, P> {
    session: S,
    source: D,
    presenter: P,
    view: ViewState,
    location: Option<Location>,
}

impl<S, D, P> Controller<S, D, P>
where
    S: SessionStore,
    D: UserSource,
    P: Presenter,
{
    pub fn new(session: S, source: D, presenter: P) -> Self {
        Self {
            session,
            source,
            presenter,
            view: ViewState::default(),
            location: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub async fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::Refresh => self.refresh().await,
            Msg::Login(candidate) => self.login(candidate).await,
            Msg::Logout => self.logout().await,
            Msg::LocationUpdated { epoch, location } => {
                if self.is_current(epoch) {
                    self.location_updated(location).await;
                }
            }
            Msg::LocationFailed { epoch, error } => {
                if self.is_current(epoch) {
                    self.report(error.into());
                }
            }
            Msg::Error(error) => self.report(error),
        }
    }

    /// Rebuild the flow selected by the session.
    pub async fn refresh(&mut self) {
        if let Err(error) = self.enter_flow().await {
            tracing::warn!("forcing logout: {}", error);
            self.session.clear();
            if let Err(fallback) = self.enter_flow().await {
                tracing::error!("anonymous flow failed after logout: {}", fallback);
            }
            self.report(error);
        }
    }

    async fn enter_flow(&mut self) -> Result<(), ProximityError> {
        self.view.epoch += 1;
        self.view.errors.clear();
        self.view.users.clear();
        self.view.loading = true;
        self.location = None;

        self.view.flow = match self.session.load() {
            Some(session) => {
                self.session.save(&session);
                Flow::Identified(session.user)
            }
            None => Flow::Anonymous,
        };
        tracing::debug!(epoch = self.view.epoch, flow = ?self.view.flow, "entering flow");
        self.presenter.present(&self.view);
        self.presenter.scroll_to_top();

        let users = match self.view.flow.current_user().map(|u| u.uid) {
            None => match self.source.fetch_all().await {
                Ok(users) => users,
                Err(e) => {
                    self.view.loading = false;
                    self.report(ProximityError::FetchFailed(e));
                    return Ok(());
                }
            },
            Some(Some(uid)) => match self.source.fetch_near(uid).await {
                Ok(users) => users,
                Err(e) => {
                    tracing::warn!(uid, "users near failed: {}", e);
                    return Err(ProximityError::NearbyUnavailable);
                }
            },
            // A session without an id cannot be asked about.
            Some(None) => return Err(ProximityError::NearbyUnavailable),
        };

        self.view.users = users;
        self.view.loading = false;
        self.presenter.present(&self.view);
        Ok(())
    }

    async fn login(&mut self, candidate: UserRecord) {
        if self.view.flow != Flow::Anonymous {
            tracing::warn!("login ignored, already identified");
            return;
        }
        let Some(location) = self.location else {
            self.report(ProximityError::LocationRequired);
            return;
        };

        match self.source.save(candidate.with_location(location)).await {
            Ok(saved) => {
                tracing::info!(uid = ?saved.uid, "logged in");
                self.session.save(&Session::new(saved));
                self.refresh().await;
            }
            Err(e) => self.report(ProximityError::SaveFailed(e)),
        }
    }

    async fn logout(&mut self) {
        tracing::info!("logged out");
        self.session.clear();
        self.refresh().await;
    }

    /// Fold a new position into the flow. When identified, the user record is
    /// saved with it and the session follows the saved record.
    async fn location_updated(&mut self, location: Location) {
        self.location = Some(location);

        let Flow::Identified(user) = &self.view.flow else {
            return;
        };
        match self.source.save(user.clone().with_location(location)).await {
            Ok(saved) => {
                self.session.save(&Session::new(saved.clone()));
                self.view.flow = Flow::Identified(saved);
                self.presenter.present(&self.view);
            }
            Err(e) => self.report(ProximityError::SaveFailed(e)),
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        if epoch != self.view.epoch {
            tracing::debug!(epoch, current = self.view.epoch, "dropping stale location result");
            return false;
        }
        true
    }

    fn report(&mut self, error: ProximityError) {
        tracing::warn!("{}", error);
        self.view.errors.push(error.to_string());
        self.presenter.present(&self.view);
        self.presenter.scroll_to_top();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use store::{Gender, MemorySessionStore, NetworkError, UserId, ValidationError};

    use super::*;

    fn user(uid: UserId, name: &str) -> UserRecord {
        UserRecord {
            uid: Some(uid),
            name: name.to_string(),
            pass: None,
            age: 25,
            gender: Gender::Female,
            looking_for_m: true,
            looking_for_f: false,
            loc: Some(Location::new(3.9 + uid as f64 / 100.0, 51.0)),
        }
    }

    fn candidate() -> UserRecord {
        UserRecord {
            uid: None,
            name: "Jos".to_string(),
            pass: Some("pass1".to_string()),
            age: 25,
            gender: Gender::Male,
            looking_for_m: false,
            looking_for_f: true,
            loc: None,
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        FetchAll,
        FetchNear(UserId),
        Save(UserRecord),
    }

    /// In-memory UserSource that records every call.
    #[derive(Clone, Default)]
    struct FakeSource {
        users: Vec<UserRecord>,
        fail_all: bool,
        fail_near: bool,
        fail_save: bool,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl FakeSource {
        fn with_users(users: Vec<UserRecord>) -> Self {
            Self {
                users,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn saves(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, Call::Save(_)))
                .count()
        }
    }

    impl UserSource for FakeSource {
        async fn fetch_all(&self) -> Result<Vec<UserRecord>, NetworkError> {
            self.calls.borrow_mut().push(Call::FetchAll);
            if self.fail_all {
                return Err(NetworkError::new("connection refused"));
            }
            Ok(self.users.clone())
        }

        async fn fetch_near(&self, uid: UserId) -> Result<Vec<UserRecord>, NetworkError> {
            self.calls.borrow_mut().push(Call::FetchNear(uid));
            if self.fail_near {
                return Err(NetworkError::new("Not found"));
            }
            Ok(self.users.clone())
        }

        async fn save(&self, mut user: UserRecord) -> Result<UserRecord, NetworkError> {
            self.calls.borrow_mut().push(Call::Save(user.clone()));
            if self.fail_save {
                return Err(NetworkError::new("Bad request"));
            }
            user.uid.get_or_insert(42);
            user.pass = None;
            Ok(user)
        }
    }

    /// Presenter that keeps every published view.
    #[derive(Clone, Default)]
    struct Recorder {
        views: Rc<RefCell<Vec<ViewState>>>,
        scrolls: Rc<RefCell<usize>>,
    }

    impl Recorder {
        fn views(&self) -> Vec<ViewState> {
            self.views.borrow().clone()
        }
    }

    impl Presenter for Recorder {
        fn present(&mut self, view: &ViewState) {
            self.views.borrow_mut().push(view.clone());
        }

        fn scroll_to_top(&mut self) {
            *self.scrolls.borrow_mut() += 1;
        }
    }

    type TestController = Controller<MemorySessionStore, FakeSource, Recorder>;

    fn controller(session: &MemorySessionStore, source: &FakeSource) -> (TestController, Recorder) {
        let recorder = Recorder::default();
        let controller = Controller::new(session.clone(), source.clone(), recorder.clone());
        (controller, recorder)
    }

    #[tokio::test]
    async fn test_no_session_selects_anonymous_flow() {
        let session = MemorySessionStore::new();
        let source = FakeSource::with_users(vec![user(1, "a"), user(2, "b")]);
        let (mut controller, _) = controller(&session, &source);

        controller.refresh().await;

        assert_eq!(controller.view().flow, Flow::Anonymous);
        assert_eq!(controller.view().users.len(), 2);
        assert!(!controller.view().loading);
        assert_eq!(source.calls(), vec![Call::FetchAll]);
    }

    #[tokio::test]
    async fn test_session_selects_identified_flow() {
        let session = MemorySessionStore::new();
        session.save(&Session::new(user(7, "me")));
        let source = FakeSource::with_users(vec![user(7, "me"), user(8, "near")]);
        let (mut controller, _) = controller(&session, &source);

        controller.refresh().await;

        assert_eq!(controller.view().flow, Flow::Identified(user(7, "me")));
        assert_eq!(controller.view().users.len(), 2);
        assert_eq!(source.calls(), vec![Call::FetchNear(7)]);
        // Refresh keeps the session alive.
        assert!(session.load().is_some());
    }

    #[tokio::test]
    async fn test_refresh_clears_errors_and_bumps_epoch() {
        let session = MemorySessionStore::new();
        let source = FakeSource::default();
        let (mut controller, recorder) = controller(&session, &source);

        controller.refresh().await;
        controller
            .handle(Msg::Error(ValidationError::MissingName.into()))
            .await;
        assert_eq!(controller.view().errors.len(), 1);

        controller.handle(Msg::Refresh).await;
        assert!(controller.view().errors.is_empty());
        assert_eq!(controller.view().epoch, 2);
        assert_eq!(*recorder.scrolls.borrow(), 3);
    }

    #[tokio::test]
    async fn test_login_without_location_never_saves() {
        let session = MemorySessionStore::new();
        let source = FakeSource::default();
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;

        controller.handle(Msg::Login(candidate())).await;

        assert_eq!(source.saves(), 0);
        assert_eq!(
            controller.view().errors.entries(),
            ["Location required to log in.".to_string()]
        );
        assert!(session.load().is_none());
    }

    #[tokio::test]
    async fn test_login_with_location_persists_session() {
        let session = MemorySessionStore::new();
        let source = FakeSource::default();
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;
        let epoch = controller.view().epoch;
        let here = Location::new(3.91, 51.01);

        controller
            .handle(Msg::LocationUpdated {
                epoch,
                location: here,
            })
            .await;
        controller.handle(Msg::Login(candidate())).await;

        let saved = candidate().with_location(here);
        assert!(source.calls().contains(&Call::Save(saved)));

        let stored = session.load().unwrap().user;
        assert_eq!(stored.uid, Some(42));
        assert_eq!(stored.loc, Some(here));
        assert_eq!(stored.pass, None);

        // The refresh after login lands in the identified flow.
        assert_eq!(controller.view().flow, Flow::Identified(stored));
        assert_eq!(source.calls().last(), Some(&Call::FetchNear(42)));
    }

    #[tokio::test]
    async fn test_failed_save_reports_and_stays_anonymous() {
        let session = MemorySessionStore::new();
        let source = FakeSource {
            fail_save: true,
            ..FakeSource::default()
        };
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;
        let epoch = controller.view().epoch;
        controller
            .handle(Msg::LocationUpdated {
                epoch,
                location: Location::ORIGIN,
            })
            .await;

        controller.handle(Msg::Login(candidate())).await;

        assert_eq!(controller.view().flow, Flow::Anonymous);
        assert_eq!(
            controller.view().errors.entries(),
            ["Could not save user: Bad request".to_string()]
        );
    }

    #[tokio::test]
    async fn test_near_failure_logs_out_then_reports() {
        let session = MemorySessionStore::new();
        session.save(&Session::new(user(7, "me")));
        let source = FakeSource {
            fail_near: true,
            ..FakeSource::with_users(vec![user(1, "a")])
        };
        let (mut controller, recorder) = controller(&session, &source);

        controller.refresh().await;

        assert!(session.load().is_none());
        assert_eq!(controller.view().flow, Flow::Anonymous);
        assert_eq!(source.calls(), vec![Call::FetchNear(7), Call::FetchAll]);

        let message = "Error fetching users near current user, try logging in again.";
        assert_eq!(controller.view().errors.entries(), [message.to_string()]);

        // The anonymous flow was on screen before the error appeared.
        let views = recorder.views();
        let logged_out = views
            .iter()
            .position(|v| v.flow == Flow::Anonymous)
            .unwrap();
        let reported = views.iter().position(|v| !v.errors.is_empty()).unwrap();
        assert!(logged_out < reported);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let session = MemorySessionStore::new();
        session.save(&Session::new(user(7, "me")));
        let source = FakeSource::default();
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;

        controller.handle(Msg::Logout).await;

        assert!(session.load().is_none());
        assert_eq!(controller.view().flow, Flow::Anonymous);
    }

    #[tokio::test]
    async fn test_location_update_saves_identified_user() {
        let session = MemorySessionStore::new();
        session.save(&Session::new(user(7, "me")));
        let source = FakeSource::default();
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;
        let epoch = controller.view().epoch;
        let moved = Location::new(4.0, 52.0);

        controller
            .handle(Msg::LocationUpdated {
                epoch,
                location: moved,
            })
            .await;

        assert_eq!(source.saves(), 1);
        assert_eq!(session.load().unwrap().user.loc, Some(moved));
        assert_eq!(
            controller.view().flow.current_user().and_then(|u| u.loc),
            Some(moved)
        );
    }

    #[tokio::test]
    async fn test_stale_location_results_are_dropped() {
        let session = MemorySessionStore::new();
        let source = FakeSource::default();
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;
        let stale = controller.view().epoch;
        controller.refresh().await;

        controller
            .handle(Msg::LocationUpdated {
                epoch: stale,
                location: Location::ORIGIN,
            })
            .await;
        controller
            .handle(Msg::LocationFailed {
                epoch: stale,
                error: GeolocationError::Timeout,
            })
            .await;

        assert_eq!(controller.location(), None);
        assert!(controller.view().errors.is_empty());
    }

    #[tokio::test]
    async fn test_geolocation_failure_is_reported() {
        let session = MemorySessionStore::new();
        let source = FakeSource::default();
        let (mut controller, _) = controller(&session, &source);
        controller.refresh().await;
        let epoch = controller.view().epoch;

        controller
            .handle(Msg::LocationFailed {
                epoch,
                error: GeolocationError::PermissionDenied,
            })
            .await;

        assert_eq!(
            controller.view().errors.entries(),
            ["Could not get current position: User denied the request for Geolocation.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_all_failure_is_reported_without_logout() {
        let session = MemorySessionStore::new();
        let source = FakeSource {
            fail_all: true,
            ..FakeSource::default()
        };
        let (mut controller, _) = controller(&session, &source);

        controller.refresh().await;

        assert_eq!(controller.view().flow, Flow::Anonymous);
        assert!(!controller.view().loading);
        assert_eq!(
            controller.view().errors.entries(),
            ["Could not fetch users: connection refused".to_string()]
        );
    }
}
