//! Catalog screen driven end to end through `handle_event`, with the host's
//! responses played back by hand.

use bookscope::api::{FetchRequest, HttpResponse};
use bookscope::app::catalog::CatalogState;
use bookscope::app::{CatalogSection, Screen};
use bookscope::ui::viewmodel::{CatalogBlock, GalleryView, LineStyle, ModalView};
use bookscope::{handle_event, Action, AppKind, AppState, Event, Language, Theme};
use serde_json::{json, Value};

fn fetches(actions: Vec<Action>) -> Vec<FetchRequest> {
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::Fetch(fetch) => Some(fetch),
            Action::CloseFocus => None,
        })
        .collect()
}

fn send(state: &mut AppState, event: Event) -> Vec<FetchRequest> {
    let (_, actions) = handle_event(state, &event).unwrap();
    fetches(actions)
}

fn respond(state: &mut AppState, fetch: &FetchRequest, status: u16, body: &Value) -> (bool, Vec<FetchRequest>) {
    let response = HttpResponse {
        id: fetch.id,
        status,
        body: serde_json::to_vec(body).unwrap(),
    };
    let (render, actions) = handle_event(state, &Event::HttpResponse(response)).unwrap();
    (render, fetches(actions))
}

fn reply(state: &mut AppState, fetch: &FetchRequest, status: u16, body: &Value) -> bool {
    respond(state, fetch, status, body).0
}

fn catalog(state: &AppState) -> &CatalogState {
    match &state.screen {
        Screen::Catalog(catalog) => catalog,
        Screen::Trivia(_) => panic!("expected the catalog screen"),
    }
}

fn overlay(state: &AppState) -> ModalView {
    state.compute_viewmodel(40, 100).overlay.expect("an overlay")
}

fn keys(books: &[bookscope::domain::Book]) -> Vec<&str> {
    books.iter().map(|book| book.key.as_str()).collect()
}

fn page(docs: &Value) -> Value {
    json!({ "numFound": 3, "start": 0, "docs": docs })
}

/// Mounts the catalog and settles the startup batch with the given pages.
fn started(trending: &Value, fiction: &Value) -> (AppState, Vec<FetchRequest>) {
    let mut state = AppState::new(AppKind::Catalog, Language::En, Theme::default());
    let startup = send(&mut state, Event::Mounted);
    assert_eq!(startup.len(), 11);
    assert!(startup[0].url.contains("first_publish_year"));
    assert!(startup[1].url.contains("subject=fiction"));

    reply(&mut state, &startup[0], 200, &page(trending));
    assert!(catalog(&state).loading);
    assert!(reply(&mut state, &startup[1], 200, &page(fiction)));
    assert!(!catalog(&state).loading);
    (state, startup)
}

fn three_author_book() -> Value {
    json!([{
        "key": "/works/OL45804W",
        "title": "The Left Hand of Darkness",
        "author_name": ["Ursula K. Le Guin", "Ghost Writer", "Second Ghost"],
        "author_key": ["OL1A", "OL2A", "OL3A"],
        "cover_i": 12345,
        "ratings_count": 90,
        "ratings_average": 4.12
    }])
}

/// Startup with one trending book, focused and opened. Returns the modal's fetches.
fn open_trending_book() -> (AppState, Vec<FetchRequest>) {
    let (mut state, _) = started(&three_author_book(), &json!([]));
    send(&mut state, Event::NextSection);
    assert_eq!(catalog(&state).section, CatalogSection::Trending);
    let modal = send(&mut state, Event::Select);
    assert!(catalog(&state).modal.is_some());
    (state, modal)
}

fn find<'a>(fetches: &'a [FetchRequest], needle: &str) -> &'a FetchRequest {
    fetches
        .iter()
        .find(|fetch| fetch.url.contains(needle))
        .unwrap_or_else(|| panic!("no request for {needle}"))
}

#[test]
fn startup_galleries_drop_books_without_covers() {
    let trending = json!([
        { "key": "/works/A", "title": "Popular", "cover_i": 1, "ratings_count": 50 },
        { "key": "/works/B", "title": "Obscure", "cover_i": 2, "ratings_count": 5 },
        { "key": "/works/C", "title": "Coverless", "ratings_count": 500 },
        { "key": "/works/D", "title": "Unrated", "cover_i": 3 }
    ]);
    let fiction = json!([
        { "key": "/works/E", "title": "Has cover", "cover_i": 4 },
        { "key": "/works/F", "title": "No cover" }
    ]);

    let (state, _) = started(&trending, &fiction);
    let catalog = catalog(&state);
    assert_eq!(keys(&catalog.trending), vec!["/works/A"]);
    assert_eq!(keys(&catalog.collection), vec!["/works/E"]);
    assert_eq!(catalog.selected_genre, "fiction");
}

#[test]
fn failed_startup_slot_leaves_its_gallery_empty() {
    let mut state = AppState::new(AppKind::Catalog, Language::En, Theme::default());
    let startup = send(&mut state, Event::Mounted);

    reply(&mut state, &startup[0], 503, &json!({}));
    reply(&mut state, &startup[1], 200, &page(&json!([{ "key": "/works/E", "cover_i": 4 }])));

    let catalog = catalog(&state);
    assert!(!catalog.loading);
    assert!(catalog.trending.is_empty());
    assert_eq!(catalog.collection.len(), 1);
}

#[test]
fn genre_counts_skip_failures_and_zeroes() {
    let (mut state, startup) = started(&json!([]), &json!([]));
    let stats = &startup[5..];
    reply(&mut state, &stats[0], 200, &json!({ "numFound": 12_400, "docs": [] }));
    reply(&mut state, &stats[1], 500, &json!({}));
    reply(&mut state, &stats[2], 200, &json!({ "numFound": 0, "docs": [] }));

    let catalog = catalog(&state);
    assert_eq!(catalog.genre_stats.len(), 1);
    assert_eq!(catalog.genre_stats.get(&catalog.genres[0]), Some(&12_400));
}

#[test]
fn blank_search_clears_results_without_a_request() {
    let (mut state, _) = started(&json!([]), &json!([]));

    send(&mut state, Event::FocusInput);
    for c in "dune".chars() {
        send(&mut state, Event::Char(c));
    }
    let search = send(&mut state, Event::Select);
    assert_eq!(search.len(), 1);
    assert!(search[0].url.contains("q=dune"));
    reply(&mut state, &search[0], 200, &page(&json!([{ "key": "/works/dune", "cover_i": 9 }])));
    assert_eq!(catalog(&state).section, CatalogSection::Results);

    send(&mut state, Event::FocusInput);
    for _ in 0..4 {
        send(&mut state, Event::Backspace);
    }
    send(&mut state, Event::Char(' '));
    send(&mut state, Event::Char(' '));
    assert!(send(&mut state, Event::Select).is_empty());

    let catalog = catalog(&state);
    assert!(catalog.search_results.is_empty());
    assert!(catalog.search_query.is_empty());
    assert_ne!(catalog.section, CatalogSection::Results);
}

#[test]
fn superseded_search_response_is_discarded() {
    let (mut state, _) = started(&json!([]), &json!([]));

    send(&mut state, Event::FocusInput);
    send(&mut state, Event::Char('a'));
    let first = send(&mut state, Event::Select);
    send(&mut state, Event::FocusInput);
    send(&mut state, Event::Char('b'));
    let second = send(&mut state, Event::Select);

    assert!(reply(&mut state, &second[0], 200, &page(&json!([{ "key": "/works/new", "cover_i": 1 }]))));
    assert!(!reply(&mut state, &first[0], 200, &page(&json!([{ "key": "/works/old", "cover_i": 2 }]))));

    assert_eq!(keys(&catalog(&state).search_results), vec!["/works/new"]);
}

#[test]
fn genre_selection_replaces_the_collection() {
    let (mut state, _) = started(&json!([]), &json!([{ "key": "/works/fic", "cover_i": 1 }]));
    assert_eq!(catalog(&state).section, CatalogSection::Genres);

    send(&mut state, Event::Right);
    let genre = catalog(&state).genres[1].clone();
    let request = send(&mut state, Event::Select);
    assert!(request[0].url.contains(&format!("subject={genre}")));

    reply(&mut state, &request[0], 200, &page(&json!([{ "key": "/works/g", "cover_i": 2 }])));
    let catalog = catalog(&state);
    assert_eq!(catalog.selected_genre, genre);
    assert_eq!(keys(&catalog.collection), vec!["/works/g"]);
}

#[test]
fn modal_keeps_only_the_authors_that_loaded() {
    let (mut state, modal) = open_trending_book();
    assert_eq!(modal.len(), 5);

    reply(&mut state, find(&modal, "/works/OL45804W.json"), 200, &json!({ "key": "/works/OL45804W" }));
    reply(
        &mut state,
        find(&modal, "/authors/OL1A.json"),
        200,
        &json!({ "key": "/authors/OL1A", "name": "Ursula K. Le Guin", "bio": "Wrote Earthsea." }),
    );
    reply(&mut state, find(&modal, "/authors/OL2A.json"), 404, &json!({}));
    assert!(overlay(&state).loading);
    assert!(reply(&mut state, find(&modal, "/authors/OL3A.json"), 500, &json!({})));

    let view = overlay(&state);
    assert!(!view.loading);
    assert!(view.texts(LineStyle::Heading).contains(&"About the Author"));
    assert_eq!(view.texts(LineStyle::Selected), vec!["Ursula K. Le Guin"]);
    assert_eq!(catalog(&state).modal.as_ref().map(|m| m.authors.len()), Some(1));
}

#[test]
fn failed_cover_probe_shows_the_placeholder() {
    let (mut state, modal) = open_trending_book();
    let probe = find(&modal, "covers.openlibrary.org/b/id/12345-L.jpg");
    assert!(reply(&mut state, probe, 404, &json!(null)));

    let view = overlay(&state);
    assert_eq!(
        view.texts(LineStyle::Link),
        vec![format!("Cover: {}", bookscope::app::catalog::COVER_PLACEHOLDER).as_str()]
    );
}

fn modal_lines_for_description(description: &Value) -> Vec<(LineStyle, String)> {
    let (mut state, modal) = open_trending_book();
    reply(
        &mut state,
        find(&modal, "/works/OL45804W.json"),
        200,
        &json!({ "key": "/works/OL45804W", "description": description, "number_of_pages": 304 }),
    );
    overlay(&state)
        .lines
        .into_iter()
        .map(|line| (line.style, line.text))
        .collect()
}

#[test]
fn description_shapes_render_identically() {
    let plain = modal_lines_for_description(&json!("A tale."));
    let wrapped = modal_lines_for_description(&json!({ "type": "/type/text", "value": "A tale." }));

    assert_eq!(plain, wrapped);
    assert!(plain.contains(&(LineStyle::Body, "A tale.".to_string())));
}

#[test]
fn closed_modal_ignores_late_details() {
    let (mut state, modal) = open_trending_book();
    assert!(send(&mut state, Event::Back).is_empty());
    assert!(catalog(&state).modal.is_none());

    assert!(!reply(&mut state, find(&modal, "/works/OL45804W.json"), 200, &json!({ "key": "/works/OL45804W" })));
    assert!(catalog(&state).modal.is_none());
}

#[test]
fn timeline_sorts_works_by_year_with_undated_last() {
    let (mut state, modal) = open_trending_book();
    reply(
        &mut state,
        find(&modal, "/authors/OL1A.json"),
        200,
        &json!({ "key": "/authors/OL1A", "name": "Ursula K. Le Guin" }),
    );
    reply(&mut state, find(&modal, "/authors/OL2A.json"), 404, &json!({}));
    reply(&mut state, find(&modal, "/authors/OL3A.json"), 404, &json!({}));

    let timeline = send(&mut state, Event::OpenAuthor);
    assert_eq!(timeline.len(), 2);
    reply(
        &mut state,
        find(&timeline, "/authors/OL1A.json"),
        200,
        &json!({ "key": "/authors/OL1A", "name": "Ursula K. Le Guin", "birth_date": "21 October 1929", "death_date": "22 January 2018" }),
    );
    assert!(reply(
        &mut state,
        find(&timeline, "/works.json"),
        200,
        &json!({ "entries": [
            { "key": "/works/W2", "title": "Later", "first_publish_date": "2001" },
            { "key": "/works/W3", "title": "Undated" },
            { "key": "/works/W1", "title": "Early", "first_publish_date": "June 1997", "covers": [77] },
            { "key": "/works/W4" }
        ] }),
    ));

    let view = overlay(&state);
    assert_eq!(view.texts(LineStyle::Dim), vec!["1929 - 2018"]);
    assert_eq!(
        view.texts(LineStyle::Body),
        vec!["   1997  Early", "   2001  Later", "Unknown  Undated"]
    );
    assert_eq!(
        view.texts(LineStyle::Link),
        vec!["         https://covers.openlibrary.org/b/id/77-S.jpg"]
    );

    send(&mut state, Event::Back);
    assert!(catalog(&state).timeline.is_none());
    assert!(catalog(&state).modal.is_some());
}

/// Galleries drawn for the featured shelves, in shelf order.
fn shelf_galleries(state: &AppState) -> Vec<GalleryView> {
    let catalog = catalog(state);
    let titles: Vec<&str> = catalog.shelves.iter().map(|shelf| shelf.title).collect();
    catalog
        .catalog_view(200)
        .blocks
        .into_iter()
        .filter_map(|block| match block {
            CatalogBlock::Gallery(gallery) if titles.contains(&gallery.title.as_str()) => Some(gallery),
            _ => None,
        })
        .collect()
}

#[test]
fn shelves_show_loading_until_their_books_arrive() {
    let (mut state, startup) = started(&three_author_book(), &json!([]));

    let loading = shelf_galleries(&state);
    assert_eq!(loading.len(), 3);
    assert!(loading.iter().all(|gallery| gallery.loading && gallery.cards.is_empty()));

    // loading shelves are drawn but never focused
    send(&mut state, Event::NextSection);
    assert_eq!(catalog(&state).section, CatalogSection::Trending);
    send(&mut state, Event::NextSection);
    assert_eq!(catalog(&state).section, CatalogSection::Genres);

    let fantasy = json!([{ "key": "/works/OL27448W", "title": "The Hobbit", "cover_i": 6979861 }]);
    assert!(reply(&mut state, &startup[2], 200, &page(&fantasy)));

    let galleries = shelf_galleries(&state);
    assert!(!galleries[0].loading);
    assert_eq!(galleries[0].cards[0].title, "The Hobbit");
    assert!(galleries[1].loading && galleries[2].loading);

    send(&mut state, Event::NextSection);
    send(&mut state, Event::NextSection);
    assert_eq!(catalog(&state).section, CatalogSection::Shelf(0));
}

#[test]
fn failed_shelf_disappears_once_settled() {
    let (mut state, startup) = started(&json!([]), &json!([]));
    assert_eq!(shelf_galleries(&state).len(), 3);

    reply(&mut state, &startup[3], 500, &json!({}));
    let remaining: Vec<String> = shelf_galleries(&state).into_iter().map(|g| g.title).collect();
    assert_eq!(remaining, vec!["Fantasy Adventures", "Mystery & Thriller"]);
}

/// Opens Le Guin's timeline from the trending book and answers it with `works`.
/// Returns the follow-up requests issued once the timeline settled.
fn settled_timeline(works: &Value) -> (AppState, Vec<FetchRequest>) {
    let (mut state, modal) = open_trending_book();
    reply(
        &mut state,
        find(&modal, "/authors/OL1A.json"),
        200,
        &json!({ "key": "/authors/OL1A", "name": "Ursula K. Le Guin" }),
    );
    reply(&mut state, find(&modal, "/authors/OL2A.json"), 404, &json!({}));
    reply(&mut state, find(&modal, "/authors/OL3A.json"), 404, &json!({}));

    let timeline = send(&mut state, Event::OpenAuthor);
    let (_, early) = respond(
        &mut state,
        find(&timeline, "/authors/OL1A.json"),
        200,
        &json!({ "key": "/authors/OL1A", "name": "Ursula K. Le Guin" }),
    );
    assert!(early.is_empty());
    let (render, follow_up) = respond(&mut state, find(&timeline, "/works.json"), 200, works);
    assert!(render);
    (state, follow_up)
}

#[test]
fn timeline_hides_work_covers_that_fail_to_load() {
    let works = json!({ "entries": [
        { "key": "/works/W1", "title": "Early", "first_publish_date": "1969", "covers": [77] },
        { "key": "/works/W2", "title": "Later", "first_publish_date": "1974", "covers": [88] },
        { "key": "/works/W3", "title": "Reprint", "first_publish_date": "1980", "covers": [77] }
    ] });
    let (mut state, checks) = settled_timeline(&works);

    let urls: Vec<&str> = checks.iter().map(|fetch| fetch.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://covers.openlibrary.org/b/id/77-S.jpg",
            "https://covers.openlibrary.org/b/id/88-S.jpg"
        ]
    );

    assert!(!reply(&mut state, &checks[1], 200, &json!(null)));
    assert!(reply(&mut state, &checks[0], 404, &json!(null)));

    assert_eq!(
        overlay(&state).texts(LineStyle::Link),
        vec!["         https://covers.openlibrary.org/b/id/88-S.jpg"]
    );
}

#[test]
fn closed_timeline_ignores_late_cover_failures() {
    let works = json!({ "entries": [
        { "key": "/works/W1", "title": "Early", "first_publish_date": "1969", "covers": [77] }
    ] });
    let (mut state, checks) = settled_timeline(&works);
    send(&mut state, Event::Back);
    assert!(catalog(&state).timeline.is_none());

    assert!(!reply(&mut state, &checks[0], 404, &json!(null)));
}
