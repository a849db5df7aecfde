use ratatui::widgets::ListState;

use crate::browser::LinkOpener;
use crate::builder::PostSource;
use crate::domain::{Filter, FilterUrls, Post, PostList};
use crate::tui::event::Action;

/// What the status line is saying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(s) | Status::Error(s) => s,
        }
    }
}

/// The list, the cursor and the active filter.
///
/// The list is only ever swapped for a fully built replacement, so the
/// renderer never sees a half-built one.
pub struct Dashboard {
    posts: PostList,
    selection: usize,
    filter: Filter,
    urls: FilterUrls,
    pub list_state: ListState,
    pub should_quit: bool,
    pub is_refreshing: bool,
    pub status: Option<Status>,
}

impl Dashboard {
    pub fn new(posts: PostList, filter: Filter, urls: FilterUrls) -> Self {
        let mut dashboard = Self {
            posts,
            selection: 0,
            filter,
            urls,
            list_state: ListState::default(),
            should_quit: false,
            is_refreshing: false,
            status: None,
        };
        dashboard.sync_list_state();
        dashboard
    }

    pub fn posts(&self) -> &PostList {
        &self.posts
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selection)
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(Status::Info(message));
    }

    pub fn set_error(&mut self, message: String) {
        self.status = Some(Status::Error(message));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn move_down(&mut self) {
        if !self.posts.is_empty() && self.selection < self.posts.len() - 1 {
            self.selection += 1;
        }
        self.sync_list_state();
    }

    pub fn move_up(&mut self) {
        self.selection = self.selection.saturating_sub(1);
        self.sync_list_state();
    }

    /// Whether `action` will trigger a rebuild when applied.
    pub fn needs_rebuild(&self, action: Action) -> bool {
        matches!(action, Action::SwitchFilter(f) if f != self.filter)
    }

    /// Apply one input. Filter switches block until the new list is built.
    pub async fn apply(
        &mut self,
        action: Action,
        source: &(dyn PostSource + Sync),
        opener: &dyn LinkOpener,
    ) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::SwitchFilter(filter) => self.switch_filter(filter, source).await,
            Action::OpenArticle => {
                if let Some(link) = self.selected_post().map(|p| p.link.clone()) {
                    self.open_link(&link, opener);
                }
            }
            Action::OpenComments => {
                let Some(post) = self.selected_post() else {
                    return;
                };
                match post.comments_link.clone() {
                    Some(link) => self.open_link(&link, opener),
                    None => self.set_status("This story has no discussion link".to_string()),
                }
            }
            Action::None => {}
        }
    }

    async fn switch_filter(&mut self, filter: Filter, source: &(dyn PostSource + Sync)) {
        if filter == self.filter {
            return;
        }

        let url = self.urls.url_for(filter).to_string();
        match source.build(&url).await {
            Ok(posts) => {
                self.replace_posts(posts);
                self.filter = filter;
                self.set_status(format!(
                    "{}: {} stories",
                    filter.label(),
                    self.posts.len()
                ));
            }
            Err(e) => {
                tracing::warn!("Keeping {} list, switch to {} failed: {}", self.filter.label(), filter.label(), e);
                self.set_error(format!("Could not load {}: {}", filter.label(), e));
            }
        }
    }

    /// Swap in a new list. The cursor keeps its position, pulled back inside
    /// the new list if it is shorter.
    fn replace_posts(&mut self, posts: PostList) {
        self.posts = posts;
        if self.selection >= self.posts.len() {
            self.selection = self.posts.len().saturating_sub(1);
        }
        self.sync_list_state();
    }

    fn open_link(&mut self, link: &str, opener: &dyn LinkOpener) {
        if let Err(e) = opener.open(link) {
            tracing::warn!("Failed to open {}: {}", link, e);
            self.set_error(format!("Failed to open browser: {}", e));
        }
    }

    fn sync_list_state(&mut self) {
        if self.posts.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.selection));
        }
    }
}
