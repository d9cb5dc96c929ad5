//! Application state management for the terminal business directory.
//!
//! This module contains the controller state shared by the grid and map
//! presentations: the active filter, the single-selection state, the
//! lazily created map adapter, and the secondary article/comment flows.

use crate::domain::{
    append_comment, builtin_articles, builtin_catalog, Article, Business, Catalog, FilterCriteria,
    FilterEngine, Paginator,
};
use crate::infrastructure::{MapAdapter, MapConfig, Preferences, PreferencesRepository};
use std::path::PathBuf;

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and which UI
/// elements are displayed.
#[derive(Debug, PartialEq)]
pub enum AppMode {
    /// Normal navigation over cards or markers
    Browse,
    /// Search box has focus - every keystroke refilters
    Search,
    /// CSV export dialog is open
    ExportCsv,
    /// Paginated articles list
    Articles,
    /// Single article with its comment form
    ArticleDetail,
    /// Help screen is displayed
    Help,
}

/// The two presentations of the same filtered subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectoryView {
    Grid,
    Map,
}

/// Which comment form field has focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommentField {
    Name,
    Email,
    Text,
}

/// A dedicated single-listing map, opened from a card's
/// "directions" action. At most one exists; opening a new one tears
/// the previous instance down first.
pub struct DetailMap {
    pub business_id: u32,
    /// `Err` holds the load failure text shown inside the modal.
    pub adapter: Result<MapAdapter, String>,
}

/// Fixed configuration assembled once at startup.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub map: MapConfig,
    pub article_page_size: usize,
    pub prefs_path: PathBuf,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            article_page_size: 4,
            prefs_path: PathBuf::from(PreferencesRepository::DEFAULT_FILE),
        }
    }
}

/// Main application state: catalog, filter, selection and view state.
///
/// All mutable state lives here and is only touched from the event
/// loop; the renderer reads it between events.
///
/// # Examples
///
/// ```
/// use vitrina::application::App;
///
/// let app = App::default();
/// assert!(app.selected.is_none());
/// assert_eq!(app.visible_businesses().len(), app.catalog.len());
/// ```
pub struct App {
    /// The business catalog, read-only after load
    pub catalog: Catalog,
    /// Articles for the news view; comments are appended in place
    pub articles: Vec<Article>,
    /// Active search text and category restriction
    pub criteria: FilterCriteria,
    /// Selected business id, if any
    pub selected: Option<u32>,
    /// Current application mode
    pub mode: AppMode,
    /// Grid or map presentation
    pub view: DirectoryView,
    /// Lazily created map adapter; `None` until the map view is opened
    pub map: Option<MapAdapter>,
    /// Load failure text shown inside the map container
    pub map_error: Option<String>,
    /// The open detail map, if any
    pub detail_map: Option<DetailMap>,
    /// Card cursor as an index into the visible subset
    pub cursor: usize,
    /// First visible card row
    pub scroll_row: usize,
    /// Card rows that fit the viewport (set by the renderer)
    pub viewport_rows: usize,
    /// Marker cursor as an index into the placed markers
    pub marker_cursor: usize,
    /// Cards per row (2, 3 or 4), persisted across sessions
    pub grid_columns: u8,
    /// Cursor position within the active input buffer
    pub cursor_position: usize,
    /// Input buffer for the CSV export filename
    pub filename_input: String,
    /// Current article page (one-based)
    pub article_page: usize,
    /// Article cursor within the current page
    pub article_cursor: usize,
    /// Open article id in detail mode
    pub open_article: Option<u32>,
    /// Comment form buffers
    pub comment_name: String,
    pub comment_email: String,
    pub comment_text: String,
    /// Focused comment form field
    pub comment_focus: CommentField,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Fixed configuration
    pub config: DirectoryConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new(
            builtin_catalog(),
            builtin_articles(),
            DirectoryConfig::default(),
            Preferences::default(),
        )
    }
}

impl App {
    pub fn new(
        catalog: Catalog,
        articles: Vec<Article>,
        config: DirectoryConfig,
        preferences: Preferences,
    ) -> Self {
        Self {
            catalog,
            articles,
            criteria: FilterCriteria::default(),
            selected: None,
            mode: AppMode::Browse,
            view: DirectoryView::Grid,
            map: None,
            map_error: None,
            detail_map: None,
            cursor: 0,
            scroll_row: 0,
            viewport_rows: 2,
            marker_cursor: 0,
            grid_columns: preferences.normalized().grid_columns,
            cursor_position: 0,
            filename_input: String::new(),
            article_page: 1,
            article_cursor: 0,
            open_article: None,
            comment_name: String::new(),
            comment_email: String::new(),
            comment_text: String::new(),
            comment_focus: CommentField::Name,
            help_scroll: 0,
            status_message: None,
            config,
        }
    }

    /// The businesses matching the active filter, in catalog order.
    pub fn visible_businesses(&self) -> Vec<&Business> {
        FilterEngine::new(&self.catalog).visible(&self.criteria)
    }

    /// Result count for the header counter.
    pub fn results_count(&self) -> usize {
        self.visible_businesses().len()
    }

    /// Whether the empty-state indicator should be shown.
    pub fn is_empty_state(&self) -> bool {
        self.visible_businesses().is_empty()
    }

    /// Reconciles cursors and map markers after any filter mutation.
    ///
    /// Runs on every search keystroke and category change: clamps the
    /// card cursor into the new subset and, when the map exists,
    /// rebuilds its markers from the subset.
    pub fn apply_filter_change(&mut self) {
        let count = self.results_count();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
        self.scroll_cursor_into_view();
        self.sync_map_markers();
    }

    /// Selects a business by id.
    ///
    /// Idempotent: selecting the already-selected id is a no-op.
    /// Otherwise the card is highlighted and scrolled into view, and if
    /// the map holds a marker for the id its popup opens and the map
    /// recenters on it. A selection without a marker keeps its card
    /// effects only.
    pub fn select(&mut self, id: u32) {
        if self.selected == Some(id) {
            return;
        }
        if !self.catalog.contains(id) {
            return;
        }
        self.selected = Some(id);
        self.ensure_selected_card_visible();
        if let Some(map) = self.map.as_mut() {
            map.focus(id);
        }
    }

    /// Clears the selection and closes any open popup.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        if let Some(map) = self.map.as_mut() {
            map.close_popup();
        }
    }

    /// Switches to the grid presentation.
    ///
    /// Never mutates the filter or the selection.
    pub fn show_grid_view(&mut self) {
        self.view = DirectoryView::Grid;
    }

    /// Switches to the map presentation.
    ///
    /// Initializes the map adapter on first use, then applies the
    /// current filtered subset. When a selection exists its marker is
    /// focused right after the markers are in place - chained on load
    /// completion, never deferred on a timer. The filter and the
    /// selection itself are left untouched.
    pub fn show_map_view(&mut self) {
        self.view = DirectoryView::Map;
        self.ensure_map();
        self.sync_map_markers();
        if let Some(id) = self.selected {
            if let Some(map) = self.map.as_mut() {
                map.focus(id);
            }
        }
    }

    /// Switches to the map view and selects the given business there.
    pub fn show_on_map(&mut self, id: u32) {
        self.show_map_view();
        self.select(id);
    }

    fn ensure_map(&mut self) {
        if self.map.is_some() || self.map_error.is_some() {
            return;
        }
        match MapAdapter::load(self.config.map) {
            Ok(adapter) => self.map = Some(adapter),
            Err(e) => self.map_error = Some(e.to_string()),
        }
    }

    fn sync_map_markers(&mut self) {
        if self.map.is_none() {
            return;
        }
        let visible = FilterEngine::new(&self.catalog).visible(&self.criteria);
        if let Some(map) = self.map.as_mut() {
            map.update_markers(&visible);
            if self.marker_cursor >= map.marker_count() {
                self.marker_cursor = map.marker_count().saturating_sub(1);
            }
        }
    }

    /// Opens the dedicated single-listing map for `id`.
    ///
    /// Any previous detail map is torn down first, so at most one
    /// instance exists. A listing without coordinates reports in the
    /// status bar instead of opening an empty map.
    pub fn open_detail_map(&mut self, id: u32) {
        self.detail_map = None;

        let Some(business) = self.catalog.get(id) else {
            return;
        };
        if business.coords.is_none() {
            self.status_message = Some(format!("{} has no registered location", business.name));
            return;
        }

        let adapter = match MapAdapter::load(self.config.map) {
            Ok(mut adapter) => {
                adapter.update_markers(&[business]);
                adapter.focus(id);
                Ok(adapter)
            }
            Err(e) => Err(e.to_string()),
        };
        self.detail_map = Some(DetailMap {
            business_id: id,
            adapter,
        });
    }

    /// Tears down the open detail map.
    pub fn close_detail_map(&mut self) {
        self.detail_map = None;
    }

    /// Moves the card cursor and keeps it visible.
    pub fn move_card_cursor(&mut self, delta_col: isize, delta_row: isize) {
        let count = self.results_count();
        if count == 0 {
            return;
        }
        let columns = self.grid_columns.max(1) as isize;
        let mut index = self.cursor as isize + delta_col + delta_row * columns;
        index = index.clamp(0, count as isize - 1);
        self.cursor = index as usize;
        self.scroll_cursor_into_view();
    }

    /// Selects the business under the card cursor.
    pub fn activate_card_cursor(&mut self) {
        if let Some(id) = self.visible_businesses().get(self.cursor).map(|b| b.id) {
            self.select(id);
        }
    }

    /// Moves the marker cursor on the map view.
    pub fn move_marker_cursor(&mut self, delta: isize) {
        let Some(map) = self.map.as_ref() else {
            return;
        };
        let count = map.marker_count();
        if count == 0 {
            return;
        }
        let index = (self.marker_cursor as isize + delta).rem_euclid(count as isize);
        self.marker_cursor = index as usize;
    }

    /// Selects the business under the marker cursor, the terminal
    /// equivalent of clicking its marker.
    pub fn activate_marker_cursor(&mut self) {
        let id = self
            .map
            .as_ref()
            .and_then(|map| map.marker_ids().get(self.marker_cursor).copied());
        if let Some(id) = id {
            self.select(id);
        }
    }

    fn ensure_selected_card_visible(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let position = FilterEngine::new(&self.catalog)
            .visible(&self.criteria)
            .iter()
            .position(|b| b.id == id);
        if let Some(index) = position {
            self.cursor = index;
            self.scroll_cursor_into_view();
        }
    }

    fn scroll_cursor_into_view(&mut self) {
        let columns = self.grid_columns.max(1) as usize;
        let row = self.cursor / columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.viewport_rows {
            self.scroll_row = row + 1 - self.viewport_rows;
        }
    }

    /// Updates the card viewport height for scrolling calculations.
    pub fn update_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    /// Applies a new grid column count and persists it.
    pub fn set_grid_columns(&mut self, columns: u8) {
        if !matches!(columns, 2 | 3 | 4) {
            return;
        }
        self.grid_columns = columns;
        self.scroll_cursor_into_view();
        let preferences = Preferences {
            grid_columns: columns,
        };
        if let Err(e) = PreferencesRepository::save(&preferences, &self.config.prefs_path) {
            self.status_message = Some(format!("Could not save preferences: {}", e));
        }
    }

    /// Cycles the category restriction: all, then each catalog
    /// category in first-seen order, then back to all.
    pub fn cycle_category(&mut self) {
        let categories: Vec<String> = self
            .catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect();
        let next = match self.criteria.category.as_deref() {
            None => categories.first().cloned(),
            Some(current) => {
                let index = categories.iter().position(|c| c == current);
                match index {
                    Some(i) if i + 1 < categories.len() => Some(categories[i + 1].clone()),
                    _ => None,
                }
            }
        };
        self.criteria.category = next;
        self.apply_filter_change();
    }

    /// Switches to search mode with the cursor at the end of the
    /// current search text.
    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.cursor_position = self.criteria.search.len();
        self.status_message = None;
    }

    /// Leaves search mode keeping the entered text.
    pub fn finish_search(&mut self) {
        self.mode = AppMode::Browse;
        self.cursor_position = 0;
    }

    /// Clears the search text and leaves search mode.
    pub fn cancel_search(&mut self) {
        self.criteria.search.clear();
        self.apply_filter_change();
        self.mode = AppMode::Browse;
        self.cursor_position = 0;
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "directorio.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "directorio.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export operation and returns to
    /// browse mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.mode = AppMode::Browse;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Cancels filename input and returns to browse mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Browse;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Switches to the articles view.
    pub fn open_articles(&mut self) {
        self.mode = AppMode::Articles;
        self.article_cursor = 0;
        self.status_message = None;
    }

    pub fn article_paginator(&self) -> Paginator {
        Paginator::new(self.config.article_page_size)
    }

    /// Moves one article page in either direction, clamped.
    pub fn change_article_page(&mut self, delta: isize) {
        let paginator = self.article_paginator();
        let page = self.article_page as isize + delta;
        self.article_page = paginator.clamp_page(page.max(1) as usize, self.articles.len());
        self.article_cursor = 0;
    }

    /// The article slice for the current (clamped) page.
    pub fn current_article_page(&self) -> &[Article] {
        let paginator = self.article_paginator();
        paginator.page_slice(&self.articles, self.article_page)
    }

    /// Moves the article cursor within the current page.
    pub fn move_article_cursor(&mut self, delta: isize) {
        let len = self.current_article_page().len();
        if len == 0 {
            return;
        }
        let index = (self.article_cursor as isize + delta).clamp(0, len as isize - 1);
        self.article_cursor = index as usize;
    }

    /// Opens the article under the cursor with an empty comment form.
    pub fn open_article_detail(&mut self) {
        let id = self.current_article_page().get(self.article_cursor).map(|a| a.id);
        if let Some(id) = id {
            self.open_article = Some(id);
            self.mode = AppMode::ArticleDetail;
            self.comment_name.clear();
            self.comment_email.clear();
            self.comment_text.clear();
            self.comment_focus = CommentField::Name;
            self.cursor_position = 0;
            self.status_message = None;
        }
    }

    /// Closes the article detail view, back to the article list.
    pub fn close_article_detail(&mut self) {
        self.open_article = None;
        self.mode = AppMode::Articles;
        self.cursor_position = 0;
    }

    /// Moves focus to the next comment form field.
    pub fn next_comment_field(&mut self) {
        self.comment_focus = match self.comment_focus {
            CommentField::Name => CommentField::Email,
            CommentField::Email => CommentField::Text,
            CommentField::Text => CommentField::Name,
        };
        self.cursor_position = self.comment_field_buffer().len();
    }

    /// The buffer of the focused comment field.
    pub fn comment_field_buffer(&self) -> &String {
        match self.comment_focus {
            CommentField::Name => &self.comment_name,
            CommentField::Email => &self.comment_email,
            CommentField::Text => &self.comment_text,
        }
    }

    pub fn comment_field_buffer_mut(&mut self) -> &mut String {
        match self.comment_focus {
            CommentField::Name => &mut self.comment_name,
            CommentField::Email => &mut self.comment_email,
            CommentField::Text => &mut self.comment_text,
        }
    }

    /// Submits the comment form against the open article.
    ///
    /// A validation failure surfaces as a blocking status message and
    /// leaves both the form and the article untouched.
    pub fn submit_comment(&mut self) {
        let Some(article_id) = self.open_article else {
            return;
        };
        match append_comment(
            &mut self.articles,
            article_id,
            &self.comment_name,
            &self.comment_email,
            &self.comment_text,
        ) {
            Ok(()) => {
                self.comment_name.clear();
                self.comment_email.clear();
                self.comment_text.clear();
                self.comment_focus = CommentField::Name;
                self.cursor_position = 0;
                self.status_message = Some("Comment added".to_string());
            }
            Err(error) => {
                self.status_message = Some(error.to_string());
            }
        }
    }

    /// Contact line for the selected business, used by the clipboard
    /// copy action.
    pub fn selected_contact_line(&self) -> Option<String> {
        let business = self.catalog.get(self.selected?)?;
        Some(format!(
            "{} | {} | {} | {}",
            business.name, business.phone, business.email, business.address
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::map::test_support::FakeWidget;
    use crate::infrastructure::MapAdapter;

    fn app_with_fake_map() -> (App, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let mut app = App::default();
        let (widget, log) = FakeWidget::new();
        app.map = Some(MapAdapter::with_widget(
            Box::new(widget),
            MapConfig::default(),
        ));
        app.sync_map_markers();
        (app, log)
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert!(matches!(app.mode, AppMode::Browse));
        assert_eq!(app.view, DirectoryView::Grid);
        assert!(app.selected.is_none());
        assert!(app.map.is_none());
        assert!(app.map_error.is_none());
        assert_eq!(app.grid_columns, 4);
        assert_eq!(app.article_page, 1);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_select_is_idempotent() {
        let (mut app, log) = app_with_fake_map();
        log.borrow_mut().clear();

        app.select(3);
        let after_first = log.borrow().len();
        assert!(after_first > 0);

        app.select(3);
        assert_eq!(log.borrow().len(), after_first);
        assert_eq!(app.selected, Some(3));

        let popups = log
            .borrow()
            .iter()
            .filter(|e| e.as_str() == "open_popup")
            .count();
        assert_eq!(popups, 1);
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut app = App::default();
        app.select(999);
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_select_without_marker_updates_card_only() {
        let (mut app, log) = app_with_fake_map();
        // Filter the subset down to one listing, then select another.
        app.criteria = FilterCriteria::with_search("miqueles");
        app.apply_filter_change();
        log.borrow_mut().clear();

        app.select(1);
        assert_eq!(app.selected, Some(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_clear_selection_closes_popup() {
        let (mut app, log) = app_with_fake_map();
        app.select(2);
        assert!(app.map.as_ref().unwrap().open_popup_business().is_some());

        app.clear_selection();
        assert!(app.selected.is_none());
        assert!(app.map.as_ref().unwrap().open_popup_business().is_none());
        assert!(log.borrow().iter().any(|e| e == "close_popup"));
    }

    #[test]
    fn test_view_toggle_preserves_filter_and_selection() {
        let mut app = App::default();
        app.criteria = FilterCriteria::with_search("curicó");
        app.apply_filter_change();
        app.select(1);
        let criteria_before = app.criteria.clone();

        app.show_map_view();
        assert_eq!(app.view, DirectoryView::Map);
        assert_eq!(app.criteria, criteria_before);
        assert_eq!(app.selected, Some(1));

        app.show_grid_view();
        assert_eq!(app.view, DirectoryView::Grid);
        assert_eq!(app.criteria, criteria_before);
        assert_eq!(app.selected, Some(1));
    }

    #[test]
    fn test_map_is_lazily_initialized_once() {
        let mut app = App::default();
        assert!(app.map.is_none());

        app.show_map_view();
        assert!(app.map.is_some());
        assert_eq!(
            app.map.as_ref().unwrap().marker_count(),
            app.visible_businesses()
                .iter()
                .filter(|b| b.coords.is_some())
                .count()
        );

        // A second toggle reuses the same adapter.
        app.show_grid_view();
        app.show_map_view();
        assert!(app.map.is_some());
    }

    #[test]
    fn test_filter_change_syncs_markers() {
        let (mut app, _log) = app_with_fake_map();
        assert_eq!(app.map.as_ref().unwrap().marker_count(), app.catalog.len());

        app.criteria.search = "miqueles".to_string();
        app.apply_filter_change();
        assert_eq!(app.map.as_ref().unwrap().marker_count(), 1);
        assert!(app.map.as_ref().unwrap().has_marker(3));
    }

    #[test]
    fn test_show_on_map_chains_selection_after_load() {
        let mut app = App::default();
        app.show_on_map(4);

        assert_eq!(app.view, DirectoryView::Map);
        assert_eq!(app.selected, Some(4));
        let map = app.map.as_ref().unwrap();
        assert_eq!(map.open_popup_business(), Some(4));
    }

    #[test]
    fn test_detail_map_replaces_previous_instance() {
        let mut app = App::default();
        app.open_detail_map(1);
        assert_eq!(app.detail_map.as_ref().unwrap().business_id, 1);

        app.open_detail_map(2);
        let detail = app.detail_map.as_ref().unwrap();
        assert_eq!(detail.business_id, 2);
        let adapter = detail.adapter.as_ref().unwrap();
        assert_eq!(adapter.marker_count(), 1);
        assert_eq!(adapter.open_popup_business(), Some(2));

        app.close_detail_map();
        assert!(app.detail_map.is_none());
    }

    #[test]
    fn test_detail_map_requires_coordinates() {
        let mut app = App::default();
        app.catalog.businesses[0].coords = None;
        let id = app.catalog.businesses[0].id;

        app.open_detail_map(id);
        assert!(app.detail_map.is_none());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_card_cursor_navigation_and_scroll() {
        let mut app = App::default();
        app.grid_columns = 2;
        app.update_viewport_rows(2);

        app.move_card_cursor(0, 1);
        assert_eq!(app.cursor, 2);
        app.move_card_cursor(1, 0);
        assert_eq!(app.cursor, 3);
        // Move past the last row: scroll follows.
        app.move_card_cursor(0, 1);
        assert_eq!(app.cursor, 5);
        assert_eq!(app.scroll_row, 1);
        // Clamped at the end.
        app.move_card_cursor(0, 5);
        assert_eq!(app.cursor, 5);
    }

    #[test]
    fn test_selection_scrolls_card_into_view() {
        let mut app = App::default();
        app.grid_columns = 2;
        app.update_viewport_rows(1);

        app.select(6);
        assert_eq!(app.cursor, 5);
        assert_eq!(app.scroll_row, 2);
    }

    #[test]
    fn test_marker_cursor_wraps_and_activates() {
        let (mut app, _log) = app_with_fake_map();
        let count = app.map.as_ref().unwrap().marker_count();

        app.move_marker_cursor(-1);
        assert_eq!(app.marker_cursor, count - 1);
        app.move_marker_cursor(1);
        assert_eq!(app.marker_cursor, 0);

        app.activate_marker_cursor();
        assert_eq!(app.selected, Some(app.catalog.businesses[0].id));
    }

    #[test]
    fn test_cycle_category_goes_through_all_and_back() {
        let mut app = App::default();
        let categories: Vec<String> = app
            .catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect();

        assert!(app.criteria.category.is_none());
        for category in &categories {
            app.cycle_category();
            assert_eq!(app.criteria.category.as_ref(), Some(category));
        }
        app.cycle_category();
        assert!(app.criteria.category.is_none());
    }

    #[test]
    fn test_grid_columns_are_validated_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();
        app.config.prefs_path = dir.path().join("prefs.json");

        app.set_grid_columns(3);
        assert_eq!(app.grid_columns, 3);
        assert_eq!(
            PreferencesRepository::load(&app.config.prefs_path).grid_columns,
            3
        );

        app.set_grid_columns(5);
        assert_eq!(app.grid_columns, 3);
    }

    #[test]
    fn test_article_pagination_clamps() {
        let mut app = App::default();
        // Four seeded articles at page size four: one page.
        assert_eq!(
            app.article_paginator().total_pages(app.articles.len()),
            1
        );

        let extra = app.articles[0].clone();
        let mut fifth = extra;
        fifth.id = 5;
        app.articles.push(fifth);
        assert_eq!(
            app.article_paginator().total_pages(app.articles.len()),
            2
        );

        app.change_article_page(1);
        assert_eq!(app.article_page, 2);
        assert_eq!(app.current_article_page().len(), 1);
        app.change_article_page(1);
        assert_eq!(app.article_page, 2);
        app.change_article_page(-5);
        assert_eq!(app.article_page, 1);
    }

    #[test]
    fn test_comment_submission_flow() {
        let mut app = App::default();
        app.open_articles();
        app.open_article_detail();
        assert_eq!(app.open_article, Some(1));

        // Empty form: rejected, nothing appended.
        app.submit_comment();
        assert!(app.status_message.as_ref().unwrap().contains("name"));
        assert!(app.articles[0].comments.is_empty());

        app.comment_name = "Ana".to_string();
        app.comment_email = "ana@correo.cl".to_string();
        app.comment_text = "Excelente iniciativa".to_string();
        app.submit_comment();

        assert_eq!(app.articles[0].comments.len(), 1);
        assert_eq!(app.articles[0].comments[0].name, "Ana");
        // Form resets after a successful append.
        assert!(app.comment_name.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Comment added"));
    }

    #[test]
    fn test_csv_export_mode() {
        let mut app = App::default();
        app.start_csv_export();
        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.get_csv_export_filename(), "directorio.csv");

        app.filename_input = "filtrado.csv".to_string();
        assert_eq!(app.get_csv_export_filename(), "filtrado.csv");

        app.set_csv_export_result(Ok("filtrado.csv".to_string()));
        assert!(matches!(app.mode, AppMode::Browse));
        assert!(app.status_message.as_ref().unwrap().contains("filtrado.csv"));

        app.start_csv_export();
        app.set_csv_export_result(Err("disk full".to_string()));
        assert!(app.status_message.as_ref().unwrap().contains("disk full"));
    }

    #[test]
    fn test_search_mode_keeps_or_clears_text() {
        let mut app = App::default();
        app.start_search();
        assert!(matches!(app.mode, AppMode::Search));

        app.criteria.search = "sol".to_string();
        app.apply_filter_change();
        app.finish_search();
        assert_eq!(app.criteria.search, "sol");

        app.start_search();
        app.cancel_search();
        assert!(app.criteria.search.is_empty());
        assert_eq!(app.results_count(), app.catalog.len());
    }

    #[test]
    fn test_selected_contact_line() {
        let mut app = App::default();
        assert!(app.selected_contact_line().is_none());

        app.select(3);
        let line = app.selected_contact_line().unwrap();
        assert!(line.contains("Miqueles Boutique"));
        assert!(line.contains("+56949685316"));
    }
}
