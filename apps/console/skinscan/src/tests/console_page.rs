use crate::console_page::{ConsoleControl, ConsolePage, PageKind, Screen, SharedInput};

use client_core::config::RoutesConfig;
use client_core::page::{CardHandle, Control, Dialogs, HistoryGrid, HistoryView};

use models::HistoryCard;

use std::io::{BufRead, Cursor, Write};
use std::sync::{Arc, Mutex};

/// Writer whose bytes stay readable after the screen takes ownership.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn input(text: &str) -> SharedInput {
    let reader: Box<dyn BufRead + Send> = Box::new(Cursor::new(text.as_bytes().to_vec()));
    Arc::new(Mutex::new(reader))
}

fn history_page(answers: &str) -> (ConsolePage, Captured) {
    let captured = Captured::default();
    let page = ConsolePage::load(
        "/history",
        &RoutesConfig::default(),
        Screen::new(Box::new(captured.clone())),
        input(answers),
    );
    (page, captured)
}

fn card(id: i64) -> HistoryCard {
    HistoryCard {
        id,
        image_src: format!("/static/uploads/{id}.png"),
        date: String::from("2024-05-01 09:30"),
        excerpt: String::from("Benign..."),
    }
}

#[test]
fn given_default_routes_when_classifying_paths_then_page_kinds_match() {
    let routes = RoutesConfig::default();

    assert_eq!(PageKind::for_path("/", &routes), PageKind::Login);
    assert_eq!(PageKind::for_path("/app", &routes), PageKind::Landing);
    assert_eq!(PageKind::for_path("/history", &routes), PageKind::History);
    assert_eq!(PageKind::for_path("/about", &routes), PageKind::Blank);
}

/// **VALUE**: Verifies each route exposes exactly the surface group of its form.
///
/// **BUG THIS CATCHES**: Would catch the history grid being offered on the landing
/// page, which would fetch history where the original page shows none.
#[test]
fn given_each_route_when_loaded_then_only_its_surfaces_present() {
    let routes = RoutesConfig::default();
    let screen = Screen::new(Box::new(Captured::default()));

    let login = ConsolePage::load("/", &routes, screen.clone(), input("")).surfaces();
    let landing = ConsolePage::load("/app", &routes, screen.clone(), input("")).surfaces();
    let history = ConsolePage::load("/history", &routes, screen.clone(), input("")).surfaces();
    let blank = ConsolePage::load("/about", &routes, screen, input("")).surfaces();

    assert!(login.auth.is_some() && login.analysis.is_none() && login.history.is_none());
    assert!(landing.analysis.is_some() && landing.auth.is_none() && landing.history.is_none());
    assert!(history.history.is_some() && history.auth.is_none() && history.analysis.is_none());
    assert!(blank.auth.is_none() && blank.analysis.is_none() && blank.history.is_none());
}

#[test]
fn given_appended_cards_when_removed_then_hidden_and_removal_printed_once() {
    let (page, captured) = history_page("");
    let grid = page.grid.clone().unwrap();

    let first = grid.append(card(7));
    grid.append(card(3));
    first.remove();
    first.remove();

    assert_eq!(grid.visible_ids(), [3]);
    assert!(grid.card(7).is_none());
    assert!(grid.card(3).is_some());
    assert_eq!(captured.text().matches("Record #7 removed.").count(), 1);
}

#[test]
fn given_placeholder_when_rendered_then_cards_dropped_and_text_printed() {
    let (page, captured) = history_page("");
    let grid = page.grid.clone().unwrap();
    grid.append(card(7));

    grid.render(&HistoryView::Unavailable);

    assert!(grid.visible_ids().is_empty());
    assert!(captured.text().contains(HistoryView::Unavailable.text()));
}

/// **VALUE**: Verifies confirmation reads one answer per prompt and defaults to no.
#[test]
fn given_scripted_answers_when_confirming_then_only_yes_accepts() {
    let (page, captured) = history_page("y\n\nYES\nnope\n");
    let dialogs = page.surfaces().history.unwrap().dialogs;

    assert!(dialogs.confirm("Erase?"));
    assert!(!dialogs.confirm("Erase?"));
    assert!(dialogs.confirm("Erase?"));
    assert!(!dialogs.confirm("Erase?"));
    assert!(!dialogs.confirm("Erase?"), "End of input should decline");
    assert!(captured.text().contains("Erase? [y/N] "));
}

#[test]
fn given_card_control_when_label_changed_then_label_printed() {
    let (page, captured) = history_page("");
    let grid = page.grid.clone().unwrap();
    let handle = grid.append(card(5));

    let control = handle.delete_control();
    control.set_label("Erasing...");

    assert_eq!(control.label(), "Erasing...");
    assert!(captured.text().contains("[Erasing...]"));
}

/// **VALUE**: Verifies a disabled button shows up on the console, once per change.
///
/// **BUG THIS CATCHES**: Would catch the busy state of a form being invisible, or
/// repeated calls with the same state flooding the output.
#[test]
fn given_control_when_disabled_and_enabled_then_each_flip_printed_once() {
    // GIVEN: An enabled button
    let captured = Captured::default();
    let control = ConsoleControl::new("ANALYZE", Screen::new(Box::new(captured.clone())));

    // WHEN: Disabling twice, then enabling
    control.set_enabled(false);
    let disabled = control.is_enabled();
    control.set_enabled(false);
    control.set_enabled(true);

    // THEN: One line per actual change
    assert!(!disabled);
    assert!(control.is_enabled());
    let output = captured.text();
    assert_eq!(output.matches("[ANALYZE (disabled)]").count(), 1);
    assert_eq!(output.matches("[ANALYZE (enabled)]").count(), 1);
}

#[test]
fn given_blank_page_when_created_then_no_surfaces() {
    let page = ConsolePage::blank();
    let surfaces = page.surfaces();

    assert_eq!(page.kind, PageKind::Blank);
    assert!(page.path.is_empty());
    assert!(surfaces.auth.is_none() && surfaces.analysis.is_none() && surfaces.history.is_none());
}
