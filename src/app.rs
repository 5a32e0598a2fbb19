use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use ratatui::{widgets::ListState, Frame};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::i18n::Translator;
use crate::ingest;
use crate::refresh::{self, FeedUpdate};
use crate::source::{self, FeedDocument, FeedId, Fetcher, LoadError, Proxy};
use crate::store::{State, StatePath, Store};
use crate::surface::Surface;
use crate::ui;
use crate::view;

/// Results coming back from background tasks.  Applied on the UI loop only.
#[derive(Debug)]
pub enum AppEvent {
    /// An ingestion fetch finished.
    Ingested {
        url: FeedId,
        outcome: Result<FeedDocument, LoadError>,
    },
    /// A refresh cycle settled.  `done` receives the number of posts added
    /// once they are merged.
    Refreshed {
        updates: Vec<FeedUpdate>,
        done: oneshot::Sender<usize>,
    },
}

/// Which widget receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Posts,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub proxy: Proxy,
    pub interval: Duration,
    pub translator: Translator,
}

pub struct App {
    store: Store,
    /// Rendered view of `store`; written by the renderers, read by `draw`.
    pub surface: Rc<RefCell<Surface>>,
    settings: Settings,
    fetcher: Arc<dyn Fetcher>,
    events: mpsc::UnboundedSender<AppEvent>,
    /// Tracked feed ids, kept current by a `feeds` subscriber.
    feed_ids: watch::Receiver<Vec<FeedId>>,
    refresh: Option<JoinHandle<()>>,
    /// Feeds queued from the command line, submitted one at a time.
    pending: VecDeque<String>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    pub focus: Focus,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new(
        settings: Settings,
        fetcher: Arc<dyn Fetcher>,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let mut store = Store::default();
        let surface = Rc::new(RefCell::new(Surface::default()));
        view::bind(&mut store, Rc::clone(&surface), settings.translator);

        let (feeds_tx, feed_ids) = watch::channel(Vec::new());
        store.subscribe(StatePath::Feeds, move |state| {
            feeds_tx.send_replace(state.feeds.iter().map(|f| f.id.clone()).collect());
        });

        Self {
            store,
            surface,
            settings,
            fetcher,
            events,
            feed_ids,
            refresh: None,
            pending: VecDeque::new(),
            list_state: ListState::default(),
            focus: Focus::default(),
            quit: false,
        }
    }

    pub fn state(&self) -> &State {
        self.store.state()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    // -- ingestion -----------------------------------------------------------

    /// Submit whatever is in the input field.  Returns whether a fetch was
    /// started.
    ///
    /// Ignored while the input is disabled, which keeps ingestions strictly
    /// one at a time.
    pub fn submit(&mut self) -> bool {
        let value = {
            let surface = self.surface.borrow();
            if !surface.accepts_input() {
                return false;
            }
            surface.input.value.clone()
        };
        self.start_ingest(&value)
    }

    fn start_ingest(&mut self, input: &str) -> bool {
        let Some(url) = ingest::begin(&mut self.store, input, &self.settings.translator) else {
            return false;
        };

        tracing::info!(feed = %url, "ingesting feed");
        let proxied = self.settings.proxy.wrap(&url);
        let fetcher = Arc::clone(&self.fetcher);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = source::load(fetcher.as_ref(), &proxied).await;
            let _ = events.send(AppEvent::Ingested { url, outcome });
        });
        true
    }

    /// Queue feeds to be added one after another.
    pub fn enqueue<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.pending.extend(urls);
        self.submit_pending();
    }

    /// Start the next queued feed.  Queued URLs never go through the input
    /// field, and they wait while the user has something typed there.
    fn submit_pending(&mut self) {
        loop {
            {
                let surface = self.surface.borrow();
                if !surface.accepts_input() || !surface.input.value.is_empty() {
                    return;
                }
            }
            let Some(url) = self.pending.pop_front() else {
                return;
            };
            if self.start_ingest(&url) {
                return;
            }
        }
    }

    /// Apply a result from a background task.
    pub fn handle_event(&mut self, event: AppEvent) {
        let before = self.store.state().posts.len();
        match event {
            AppEvent::Ingested { url, outcome } => {
                if ingest::settle(&mut self.store, url, outcome, &self.settings.translator) {
                    self.start_refresh();
                }
                self.shift_selection(self.store.state().posts.len() - before);
                self.submit_pending();
            }
            AppEvent::Refreshed { updates, done } => {
                let added = refresh::merge(&mut self.store, &updates);
                self.shift_selection(added);
                let _ = done.send(added);
            }
        }
    }

    /// The refresh loop starts with the first feed and then runs for the rest
    /// of the session.
    fn start_refresh(&mut self) {
        if self.refresh.is_some() {
            return;
        }
        tracing::debug!(interval = ?self.settings.interval, "starting refresh loop");
        self.refresh = Some(refresh::spawn(
            Arc::clone(&self.fetcher),
            self.settings.proxy.clone(),
            self.feed_ids.clone(),
            self.events.clone(),
            self.settings.interval,
        ));
    }

    // -- input field ---------------------------------------------------------

    pub fn type_char(&mut self, c: char) {
        let mut surface = self.surface.borrow_mut();
        if surface.accepts_input() {
            surface.input.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let cleared = {
            let mut surface = self.surface.borrow_mut();
            if !surface.accepts_input() || surface.input.value.pop().is_none() {
                return;
            }
            surface.input.value.is_empty()
        };
        if cleared {
            self.submit_pending();
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Posts,
            Focus::Posts => Focus::Input,
        };
        if self.focus == Focus::Posts && self.list_state.selected().is_none() {
            self.select_first();
        }
    }

    // -- preview -------------------------------------------------------------

    /// Open the selected post in the modal and mark it seen.
    pub fn preview_selected(&mut self) {
        let id = {
            let surface = self.surface.borrow();
            self.list_state
                .selected()
                .and_then(|i| surface.posts.get(i))
                .map(|row| row.id)
        };
        if let Some(id) = id {
            self.store.set_opened_post(Some(id));
            self.store.mark_seen(id);
        }
    }

    pub fn close_modal(&mut self) {
        self.store.set_opened_post(None);
    }

    pub fn modal_open(&self) -> bool {
        self.store.state().modal.opened_post.is_some()
    }

    // -- navigation ----------------------------------------------------------

    fn post_count(&self) -> usize {
        self.surface.borrow().posts.len()
    }

    /// Keep the selection on the same post when `added` posts were prepended.
    fn shift_selection(&mut self, added: usize) {
        if added == 0 {
            return;
        }
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i + added));
        }
    }

    pub fn select_next(&mut self) {
        let len = self.post_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.post_count() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.post_count() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.post_count();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    // -- rendering -----------------------------------------------------------

    pub fn draw(&mut self, frame: &mut Frame) {
        ui::draw(&self.surface.borrow(), &mut self.list_state, self.focus, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::source::testing::{StubFetcher, FEED_V1, FEED_V2, NOT_A_FEED, OTHER_FEED};
    use crate::store::{FormStatus, LoadingStatus};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use reqwest::Url;

    const LESSONS: &str = "https://example.com/lessons.rss";
    const NEWS: &str = "https://news.example.com/rss";

    fn settings() -> Settings {
        Settings {
            proxy: Proxy::new(Url::parse("https://proxy.test/").unwrap()),
            interval: refresh::DEFAULT_INTERVAL,
            translator: Translator::new(Locale::En),
        }
    }

    fn setup(fetcher: Arc<StubFetcher>) -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(settings(), fetcher, tx), rx)
    }

    fn proxied(url: &str) -> String {
        settings().proxy.wrap(url)
    }

    fn type_str(app: &mut App, s: &str) {
        s.chars().for_each(|c| app.type_char(c));
    }

    /// Type `url`, submit and apply the resulting event.
    async fn add_feed(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppEvent>, url: &str) {
        type_str(app, url);
        assert!(app.submit());
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_empty() {
        let (app, _rx) = setup(Arc::new(StubFetcher::new()));
        assert!(app.state().posts.is_empty());
        assert!(!app.quit);
        assert!(!app.is_refreshing());
        assert!(app.list_state.selected().is_none());
        assert_eq!(app.surface.borrow().labels.header, "RSS reader");
    }

    // -- ingestion -----------------------------------------------------------

    #[tokio::test]
    async fn adding_a_feed_shows_its_posts() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher);

        add_feed(&mut app, &mut rx, LESSONS).await;

        assert_eq!(app.state().posts.len(), 2);
        assert_eq!(app.state().form.status, FormStatus::Filling);
        assert_eq!(app.state().loading_process.status, LoadingStatus::Idle);
        let surface = app.surface.borrow();
        assert_eq!(surface.posts.len(), 2);
        assert_eq!(surface.feeds[0].title, "Lessons");
        assert!(surface.input.value.is_empty());
        assert_eq!(surface.message.as_ref().unwrap().text, "Feed was successfully added");
    }

    #[tokio::test]
    async fn input_is_locked_while_loading() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher.clone());

        type_str(&mut app, LESSONS);
        assert!(app.submit());
        assert!(!app.surface.borrow().accepts_input());
        assert_eq!(app.surface.borrow().message.as_ref().unwrap().text, "Loading ...");

        app.type_char('x');
        assert!(!app.submit(), "second submit while loading is ignored");
        assert_eq!(app.surface.borrow().input.value, LESSONS);

        app.handle_event(rx.recv().await.unwrap());
        assert!(app.surface.borrow().accepts_input());
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn duplicate_feed_is_rejected_without_fetching() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher.clone());
        add_feed(&mut app, &mut rx, LESSONS).await;

        type_str(&mut app, LESSONS);
        assert!(!app.submit());

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(app.state().feeds.len(), 1);
        assert_eq!(app.state().posts.len(), 2);
        let surface = app.surface.borrow();
        assert!(surface.input.invalid);
        assert_eq!(
            surface.message.as_ref().unwrap().text,
            "This feed is already here (please find it below)"
        );
    }

    #[tokio::test]
    async fn page_without_feed_reports_no_rss() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), NOT_A_FEED);
        let (mut app, mut rx) = setup(fetcher);

        add_feed(&mut app, &mut rx, LESSONS).await;

        assert!(app.state().feeds.is_empty());
        assert!(!app.is_refreshing());
        let surface = app.surface.borrow();
        assert!(surface.accepts_input());
        assert_eq!(surface.input.value, LESSONS, "failed URL stays for editing");
        assert_eq!(surface.message.as_ref().unwrap().text, "There is no RSS-feed at this URL");
    }

    #[tokio::test]
    async fn queued_feeds_are_added_in_turn() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        fetcher.respond(&proxied(NEWS), OTHER_FEED);
        let (mut app, mut rx) = setup(fetcher);

        app.enqueue(vec![
            "not a url".to_string(),
            LESSONS.to_string(),
            NEWS.to_string(),
        ]);
        app.handle_event(rx.recv().await.unwrap());
        app.handle_event(rx.recv().await.unwrap());

        let ids: Vec<&str> = app.state().feeds.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, [NEWS, LESSONS]);
        assert_eq!(app.state().posts.len(), 3);
    }

    #[tokio::test]
    async fn queued_feeds_wait_for_typed_text() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher.clone());

        type_str(&mut app, "ab");
        app.enqueue(vec![LESSONS.to_string()]);
        assert_eq!(app.state().loading_process.status, LoadingStatus::Idle);
        assert_eq!(app.surface.borrow().input.value, "ab");

        app.backspace();
        assert_eq!(app.state().loading_process.status, LoadingStatus::Idle);
        app.backspace();
        assert_eq!(app.state().loading_process.status, LoadingStatus::Loading);

        app.handle_event(rx.recv().await.unwrap());
        assert_eq!(app.state().feeds.len(), 1);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn failed_queued_feed_leaves_the_input_alone() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), NOT_A_FEED);
        fetcher.respond(&proxied(NEWS), OTHER_FEED);
        let (mut app, mut rx) = setup(fetcher);

        app.enqueue(vec![LESSONS.to_string(), NEWS.to_string()]);
        assert!(app.surface.borrow().input.value.is_empty());

        app.handle_event(rx.recv().await.unwrap());
        assert!(app.surface.borrow().input.value.is_empty());
        assert_eq!(app.state().loading_process.status, LoadingStatus::Loading);

        app.handle_event(rx.recv().await.unwrap());
        let ids: Vec<&str> = app.state().feeds.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, [NEWS]);
    }

    #[tokio::test(start_paused = true)]
    async fn silent_server_releases_the_form() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.hang(&proxied(LESSONS));
        let (mut app, mut rx) = setup(fetcher);

        add_feed(&mut app, &mut rx, LESSONS).await;

        assert!(app.state().feeds.is_empty());
        assert_eq!(app.state().loading_process.status, LoadingStatus::Failed);
        let surface = app.surface.borrow();
        assert!(surface.accepts_input());
        assert_eq!(surface.message.as_ref().unwrap().text, "Network error. Try again later");
    }

    // -- refresh -------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn refresh_prepends_new_posts() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher
            .respond(&proxied(LESSONS), FEED_V1)
            .respond(&proxied(LESSONS), FEED_V2);
        let (mut app, mut rx) = setup(fetcher);
        add_feed(&mut app, &mut rx, LESSONS).await;
        assert!(app.is_refreshing());

        app.select_last();
        assert_eq!(app.list_state.selected(), Some(1));

        app.handle_event(rx.recv().await.unwrap());

        let titles: Vec<&str> = app.state().posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Pagination", "Filtering", "Open API"]);
        assert_eq!(app.list_state.selected(), Some(2), "selection follows its post");

        // Nothing changed on the next cycle.
        app.handle_event(rx.recv().await.unwrap());
        assert_eq!(app.state().posts.len(), 3);
    }

    // -- preview -------------------------------------------------------------

    #[tokio::test]
    async fn preview_opens_modal_and_marks_seen() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher);
        add_feed(&mut app, &mut rx, LESSONS).await;

        app.toggle_focus();
        assert_eq!(app.focus, Focus::Posts);
        app.preview_selected();

        assert!(app.modal_open());
        {
            let surface = app.surface.borrow();
            assert_eq!(surface.modal.as_ref().unwrap().title, "Filtering");
            assert!(surface.posts[0].seen);
            assert!(!surface.posts[1].seen);
        }

        app.close_modal();
        assert!(!app.modal_open());
        assert!(app.surface.borrow().modal.is_none());
        assert!(app.surface.borrow().posts[0].seen, "seen is permanent");
    }

    #[test]
    fn preview_without_selection_is_noop() {
        let (mut app, _rx) = setup(Arc::new(StubFetcher::new()));
        app.preview_selected();
        assert!(!app.modal_open());
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let (mut app, _rx) = setup(Arc::new(StubFetcher::new()));
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[tokio::test]
    async fn navigation_clamps_to_bounds() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher);
        add_feed(&mut app, &mut rx, LESSONS).await;

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_next();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(1));
        app.select_previous();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_last();
        assert_eq!(app.list_state.selected(), Some(1));
    }

    // -- rendering (smoke tests) ---------------------------------------------

    #[tokio::test]
    async fn draw_does_not_panic_with_posts_and_modal() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond(&proxied(LESSONS), FEED_V1);
        let (mut app, mut rx) = setup(fetcher);
        add_feed(&mut app, &mut rx, LESSONS).await;
        app.toggle_focus();
        app.preview_selected();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
    }
}
