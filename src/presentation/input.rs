use crate::application::{App, AppMode, DirectoryView};
use crate::domain::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browse => Self::handle_browse_mode(app, key, modifiers),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::ExportCsv => Self::handle_export_mode(app, key),
            AppMode::Articles => Self::handle_articles_mode(app, key),
            AppMode::ArticleDetail => Self::handle_article_detail_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_browse_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // The detail map modal captures input until closed.
        if app.detail_map.is_some() {
            if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_detail_map();
            }
            return;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('c') => app.cycle_category(),
            KeyCode::Tab => match app.view {
                DirectoryView::Grid => app.show_map_view(),
                DirectoryView::Map => app.show_grid_view(),
            },
            KeyCode::Char('m') => app.show_map_view(),
            KeyCode::Char('g') => app.show_grid_view(),
            KeyCode::Char('2') => app.set_grid_columns(2),
            KeyCode::Char('3') => app.set_grid_columns(3),
            KeyCode::Char('4') => app.set_grid_columns(4),
            KeyCode::Char('a') => app.open_articles(),
            KeyCode::Char('x') => app.clear_selection(),
            KeyCode::Char('d') => {
                if let Some(id) = app.visible_businesses().get(app.cursor).map(|b| b.id) {
                    app.open_detail_map(id);
                }
            }
            KeyCode::Char('o') => {
                if let Some(id) = app.visible_businesses().get(app.cursor).map(|b| b.id) {
                    app.show_on_map(id);
                }
            }
            KeyCode::Char('y') => Self::copy_selected_contact(app),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Enter => match app.view {
                DirectoryView::Grid => app.activate_card_cursor(),
                DirectoryView::Map => app.activate_marker_cursor(),
            },
            KeyCode::Left | KeyCode::Char('h') => match app.view {
                DirectoryView::Grid => app.move_card_cursor(-1, 0),
                DirectoryView::Map => app.move_marker_cursor(-1),
            },
            KeyCode::Right | KeyCode::Char('l') => match app.view {
                DirectoryView::Grid => app.move_card_cursor(1, 0),
                DirectoryView::Map => app.move_marker_cursor(1),
            },
            KeyCode::Up | KeyCode::Char('k') => match app.view {
                DirectoryView::Grid => app.move_card_cursor(0, -1),
                DirectoryView::Map => app.move_marker_cursor(-1),
            },
            KeyCode::Down | KeyCode::Char('j') => match app.view {
                DirectoryView::Grid => app.move_card_cursor(0, 1),
                DirectoryView::Map => app.move_marker_cursor(1),
            },
            _ => {}
        }
    }

    fn copy_selected_contact(app: &mut App) {
        match app.selected_contact_line() {
            Some(text) => {
                let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text));
                app.status_message = Some(match result {
                    Ok(()) => "Contact copied to clipboard".to_string(),
                    Err(e) => format!("Clipboard error: {}", e),
                });
            }
            None => {
                app.status_message = Some("Select a listing first".to_string());
            }
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Enter => app.finish_search(),
            KeyCode::Backspace => {
                app.criteria.search.pop();
                app.cursor_position = app.criteria.search.len();
                app.apply_filter_change();
            }
            KeyCode::Char(c) => {
                app.criteria.search.push(c);
                app.cursor_position = app.criteria.search.len();
                app.apply_filter_change();
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = {
                    let visible = app.visible_businesses();
                    CsvExporter::export_businesses(&visible, &filename)
                };
                app.set_csv_export_result(result);
            }
            KeyCode::Backspace => {
                app.filename_input.pop();
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.push(c);
                app.cursor_position = app.filename_input.len();
            }
            _ => {}
        }
    }

    fn handle_articles_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                app.mode = AppMode::Browse;
                app.status_message = None;
            }
            KeyCode::Left | KeyCode::Char('p') => app.change_article_page(-1),
            KeyCode::Right | KeyCode::Char('n') => app.change_article_page(1),
            KeyCode::Up | KeyCode::Char('k') => app.move_article_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_article_cursor(1),
            KeyCode::Enter => app.open_article_detail(),
            _ => {}
        }
    }

    fn handle_article_detail_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.close_article_detail(),
            KeyCode::Tab => app.next_comment_field(),
            KeyCode::Enter => app.submit_comment(),
            KeyCode::Backspace => {
                app.comment_field_buffer_mut().pop();
                app.cursor_position = app.comment_field_buffer().len();
            }
            KeyCode::Char(c) => {
                app.comment_field_buffer_mut().push(c);
                app.cursor_position = app.comment_field_buffer().len();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Browse;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_search_refilters_per_keystroke() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('/'));
        assert!(matches!(app.mode, AppMode::Search));

        type_text(&mut app, "miq");
        assert_eq!(app.results_count(), 1);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.results_count(), app.catalog.len());

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::Browse));
    }

    #[test]
    fn test_tab_toggles_views() {
        let mut app = App::default();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, DirectoryView::Map);
        assert!(app.map.is_some());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, DirectoryView::Grid);
    }

    #[test]
    fn test_density_keys_persist_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();
        app.config.prefs_path = dir.path().join("prefs.json");

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.grid_columns, 2);
        assert!(app.config.prefs_path.exists());
    }

    #[test]
    fn test_detail_map_modal_captures_input() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.detail_map.is_some());

        // Navigation keys are swallowed while the modal is open.
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 0);

        press(&mut app, KeyCode::Esc);
        assert!(app.detail_map.is_none());
    }

    #[test]
    fn test_csv_export_flow_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("listado.csv");

        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(matches!(app.mode, AppMode::ExportCsv));

        app.filename_input = target.to_string_lossy().to_string();
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, AppMode::Browse));
        let content = std::fs::read_to_string(&target).unwrap();
        // Header plus one row per listing.
        assert_eq!(content.lines().count(), app.catalog.len() + 1);
        assert!(content.contains("Miqueles Boutique"));
    }

    #[test]
    fn test_comment_form_typing_and_submit() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::ArticleDetail));

        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ana@correo.cl");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Muy interesante");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.articles[0].comments.len(), 1);
        assert_eq!(app.articles[0].comments[0].email, "ana@correo.cl");
    }

    #[test]
    fn test_marker_selection_from_map_view() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        let expected = app.catalog.businesses[1].id;
        assert_eq!(app.selected, Some(expected));
        assert_eq!(
            app.map.as_ref().unwrap().open_popup_business(),
            Some(expected)
        );
    }
}
