//! Trivia screen driven end to end through `handle_event`.

use bookscope::api::trivia::{TriviaItem, TriviaResource};
use bookscope::api::{FetchRequest, HttpResponse};
use bookscope::app::trivia::TriviaState;
use bookscope::app::Screen;
use bookscope::ui::viewmodel::{LineStyle, ScreenBody};
use bookscope::{handle_event, Action, AppKind, AppState, Event, Language, Theme};
use serde_json::{json, Value};

const BASE: &str = "https://potterapi-fedeperin.vercel.app";

fn send(state: &mut AppState, event: Event) -> Vec<FetchRequest> {
    let (_, actions) = handle_event(state, &event).unwrap();
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::Fetch(fetch) => Some(fetch),
            Action::CloseFocus => None,
        })
        .collect()
}

fn reply(state: &mut AppState, fetch: &FetchRequest, status: u16, body: &Value) -> bool {
    let response = HttpResponse {
        id: fetch.id,
        status,
        body: serde_json::to_vec(body).unwrap(),
    };
    handle_event(state, &Event::HttpResponse(response)).unwrap().0
}

fn trivia(state: &AppState) -> &TriviaState {
    match &state.screen {
        Screen::Trivia(trivia) => trivia,
        Screen::Catalog(_) => panic!("expected the trivia screen"),
    }
}

fn fixtures(tag: &str) -> [Value; 8] {
    let book = json!({ "number": 1, "title": format!("{tag} Stone"), "releaseDate": "Jun 26, 1997", "pages": 223, "cover": "https://example.org/1.jpg", "description": "A boy." });
    let character = json!({ "fullName": format!("{tag} Granger"), "hogwartsHouse": "Gryffindor", "children": [], "image": "" });
    let house = json!({ "house": format!("{tag}claw"), "emoji": "🦅", "founder": "Rowena", "colors": ["blue"], "animal": "Eagle", "element": "Air", "traits": [] });
    let spell = json!({ "spell": format!("{tag} Accio"), "use": "Summons an object" });
    [
        json!([book.clone()]),
        json!([character.clone(), character.clone()]),
        json!([house.clone()]),
        json!([spell.clone(), spell.clone(), spell.clone()]),
        book,
        character,
        house,
        spell,
    ]
}

/// Answers all eight startup requests with the `tag`ged fixtures.
fn settle(state: &mut AppState, startup: &[FetchRequest], tag: &str) {
    for (fetch, body) in startup.iter().zip(fixtures(tag).iter()) {
        reply(state, fetch, 200, body);
    }
}

fn started(language: Language) -> AppState {
    let mut state = AppState::new(AppKind::Trivia, language, Theme::default());
    let startup = send(&mut state, Event::Mounted);
    settle(&mut state, &startup, "First");
    state
}

fn featured_title(state: &AppState, resource: TriviaResource) -> String {
    match trivia(state).featured.get(&resource) {
        Some(TriviaItem::Book(book)) => book.title.clone(),
        Some(TriviaItem::Character(character)) => character.full_name.clone(),
        Some(TriviaItem::House(house)) => house.house.clone(),
        Some(TriviaItem::Spell(spell)) => spell.spell.clone(),
        None => String::new(),
    }
}

#[test]
fn startup_fetches_every_list_and_a_random_pick_each() {
    let mut state = AppState::new(AppKind::Trivia, Language::Es, Theme::default());
    let startup = send(&mut state, Event::Mounted);

    let urls: Vec<&str> = startup.iter().map(|f| f.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{BASE}/es/books"),
            format!("{BASE}/es/characters"),
            format!("{BASE}/es/houses"),
            format!("{BASE}/es/spells"),
            format!("{BASE}/es/books/random"),
            format!("{BASE}/es/characters/random"),
            format!("{BASE}/es/houses/random"),
            format!("{BASE}/es/spells/random"),
        ]
    );

    settle(&mut state, &startup, "First");
    let trivia = trivia(&state);
    assert!(!trivia.loading);
    assert_eq!(
        TriviaResource::ALL.map(|r| trivia.count(r)),
        [1, 2, 1, 3]
    );
    assert_eq!(trivia.featured.len(), 4);
}

#[test]
fn failed_startup_entries_resolve_to_empty() {
    let mut state = AppState::new(AppKind::Trivia, Language::En, Theme::default());
    let startup = send(&mut state, Event::Mounted);
    let bodies = fixtures("First");
    for (slot, (fetch, body)) in startup.iter().zip(bodies.iter()).enumerate() {
        let status = if slot == 1 || slot == 7 { 500 } else { 200 };
        reply(&mut state, fetch, status, body);
    }

    let trivia = trivia(&state);
    assert!(!trivia.loading);
    assert_eq!(trivia.count(TriviaResource::Characters), 0);
    assert!(!trivia.featured.contains_key(&TriviaResource::Spells));
    assert_eq!(trivia.count(TriviaResource::Books), 1);
}

#[test]
fn language_change_refetches_and_replaces_everything() {
    let mut state = started(Language::En);
    assert_eq!(featured_title(&state, TriviaResource::Books), "First Stone");

    let refetch = send(&mut state, Event::NextLanguage);
    assert_eq!(refetch.len(), 8);
    let next = Language::En.next();
    let prefix = format!("{BASE}/{}/", next.code());
    assert!(refetch.iter().all(|fetch| fetch.url.starts_with(&prefix)));
    assert!(trivia(&state).loading);

    settle(&mut state, &refetch, "Second");
    let trivia = trivia(&state);
    assert_eq!(trivia.language(), next);
    assert_eq!(trivia.books[0].title, "Second Stone");
    assert_eq!(trivia.characters.len(), 2);
    assert_eq!(trivia.characters[0].full_name, "Second Granger");
    assert_eq!(featured_title(&state, TriviaResource::Spells), "Second Accio");
}

#[test]
fn replies_in_the_previous_language_are_dropped() {
    let mut state = AppState::new(AppKind::Trivia, Language::En, Theme::default());
    let first = send(&mut state, Event::Mounted);
    settle(&mut state, &first, "First");

    let old_reroll = send(&mut state, Event::Reroll);
    let second = send(&mut state, Event::NextLanguage);
    settle(&mut state, &second, "Second");

    assert!(!reply(&mut state, &old_reroll[0], 200, &json!({ "number": 9, "title": "Stale" })));
    assert_eq!(featured_title(&state, TriviaResource::Books), "Second Stone");
}

#[test]
fn reroll_replaces_only_the_active_tab_pick() {
    let mut state = started(Language::En);
    send(&mut state, Event::NextSection);
    assert_eq!(trivia(&state).tab, TriviaResource::Characters);

    let reroll = send(&mut state, Event::Reroll);
    assert_eq!(reroll.len(), 1);
    assert_eq!(reroll[0].url, format!("{BASE}/en/characters/random"));

    assert!(reply(&mut state, &reroll[0], 200, &json!({ "fullName": "Luna Lovegood" })));
    assert_eq!(featured_title(&state, TriviaResource::Characters), "Luna Lovegood");
    assert_eq!(featured_title(&state, TriviaResource::Books), "First Stone");
}

#[test]
fn filter_narrows_the_active_tab() {
    let mut state = AppState::new(AppKind::Trivia, Language::En, Theme::default());
    let startup = send(&mut state, Event::Mounted);
    let mut bodies = fixtures("First");
    bodies[3] = json!([
        { "spell": "Accio", "use": "Summons" },
        { "spell": "Lumos", "use": "Light" },
        { "spell": "Alohomora", "use": "Unlocks" }
    ]);
    for (fetch, body) in startup.iter().zip(bodies.iter()) {
        reply(&mut state, fetch, 200, body);
    }

    send(&mut state, Event::PrevSection);
    assert_eq!(trivia(&state).tab, TriviaResource::Spells);
    send(&mut state, Event::FocusInput);
    for c in "lum".chars() {
        send(&mut state, Event::Char(c));
    }

    let view = state.compute_viewmodel(40, 100);
    let ScreenBody::Trivia(body) = view.body else {
        panic!("expected the trivia body");
    };
    let titles: Vec<&str> = body.items.iter().map(|card| card.title.as_str()).collect();
    assert_eq!(titles, vec!["Lumos"]);
    assert_eq!(body.items[0].highlight_ranges, vec![(0, 3)]);

    send(&mut state, Event::ClearInput);
    assert_eq!(trivia(&state).visible().len(), 3);
}

#[test]
fn uppercase_filter_matches_and_highlights() {
    let mut state = AppState::new(AppKind::Trivia, Language::En, Theme::default());
    let startup = send(&mut state, Event::Mounted);
    let mut bodies = fixtures("First");
    bodies[3] = json!([
        { "spell": "Accio", "use": "Summons" },
        { "spell": "Lumos", "use": "Light" }
    ]);
    for (fetch, body) in startup.iter().zip(bodies.iter()) {
        reply(&mut state, fetch, 200, body);
    }

    send(&mut state, Event::PrevSection);
    send(&mut state, Event::FocusInput);
    for c in "LUM".chars() {
        send(&mut state, Event::Char(c));
    }

    let view = state.compute_viewmodel(40, 100);
    let ScreenBody::Trivia(body) = view.body else {
        panic!("expected the trivia body");
    };
    assert_eq!(body.items.len(), 1);
    assert_eq!(body.items[0].title, "Lumos");
    assert_eq!(body.items[0].highlight_ranges, vec![(0, 3)]);
}

#[test]
fn character_without_image_falls_back_without_a_request() {
    let mut state = started(Language::En);
    send(&mut state, Event::NextSection);

    assert!(send(&mut state, Event::Select).is_empty());
    let overlay = state.compute_viewmodel(40, 100).overlay.expect("detail overlay");
    assert_eq!(overlay.title, "First Granger");
    assert_eq!(
        overlay.texts(LineStyle::Link),
        vec![format!("Image: {}", bookscope::app::trivia::CHARACTER_PLACEHOLDER).as_str()]
    );
}

#[test]
fn broken_cover_swaps_in_the_placeholder() {
    let mut state = started(Language::En);

    let probe = send(&mut state, Event::OpenFeatured);
    assert_eq!(probe.len(), 1);
    assert_eq!(probe[0].url, "https://example.org/1.jpg");

    assert!(reply(&mut state, &probe[0], 404, &json!(null)));
    let overlay = state.compute_viewmodel(40, 100).overlay.expect("detail overlay");
    assert_eq!(
        overlay.texts(LineStyle::Link),
        vec![format!("Cover: {}", bookscope::app::trivia::BOOK_PLACEHOLDER).as_str()]
    );
}
