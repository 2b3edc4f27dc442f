//! Infinite scroll through a genre page, driven by viewport events.

use marquee::api::MemoryBackend;
use marquee::pagination::Span;
use marquee::{runtime_with_backend, ui, Config, Event, Runtime};
use std::sync::Arc;

const VIEWPORT: f64 = 900.0;

fn catalog(drama: usize) -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    for n in 0..drama {
        backend.insert_movie(&format!("Drama {n:02}"), "Someone", 2000, Some("Drama"));
    }
    backend.insert_movie("Airplane!", "Zucker", 1980, Some("Comedy"));
    backend
}

async fn scroll_to_bottom(runtime: &mut Runtime) {
    let items = runtime.state().pager.items().len();
    let sentinel = runtime.state().layout.sentinel_span(items);
    runtime
        .dispatch(Event::Scroll {
            viewport: Span::new(sentinel.bottom() - VIEWPORT, VIEWPORT),
        })
        .await
        .unwrap();
}

async fn open_genre(backend: &Arc<MemoryBackend>, genre: &str) -> Runtime {
    let mut runtime = runtime_with_backend(&Config::default(), backend.clone());
    runtime
        .dispatch(Event::Scroll {
            viewport: Span::new(0.0, VIEWPORT),
        })
        .await
        .unwrap();
    runtime
        .dispatch(Event::ShowGenre(genre.to_string()))
        .await
        .unwrap();
    runtime
}

#[tokio::test]
async fn twenty_five_movies_take_two_pages() {
    let backend = catalog(25);
    let mut runtime = open_genre(&backend, "Drama").await;

    assert_eq!(runtime.state().pager.items().len(), 20);
    assert!(runtime.state().pager.has_more());
    assert_eq!(backend.calls("movies_by_genre"), 1);

    scroll_to_bottom(&mut runtime).await;
    let pager = &runtime.state().pager;
    assert_eq!(pager.items().len(), 25);
    assert!(!pager.has_more());
    assert_eq!(pager.total(), Some(25));
    assert_eq!(backend.calls("movies_by_genre"), 2);

    scroll_to_bottom(&mut runtime).await;
    assert_eq!(backend.calls("movies_by_genre"), 2);

    let screen = ui::render(runtime.state(), 80);
    assert!(screen.contains("You've reached the end of Drama movies"), "{screen}");
    assert!(screen.contains("Drama 24"));
}

#[tokio::test]
async fn server_order_is_kept_across_pages() {
    let backend = catalog(23);
    let mut runtime = open_genre(&backend, "Drama").await;
    scroll_to_bottom(&mut runtime).await;

    let titles: Vec<&str> = runtime
        .state()
        .pager
        .items()
        .iter()
        .map(|movie| movie.title.as_str())
        .collect();
    let expected: Vec<String> = (0..23).map(|n| format!("Drama {n:02}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn switching_genre_starts_over() {
    let backend = catalog(25);
    let mut runtime = open_genre(&backend, "Drama").await;
    scroll_to_bottom(&mut runtime).await;

    runtime
        .dispatch(Event::ShowGenre("Comedy".to_string()))
        .await
        .unwrap();
    let items = runtime.state().pager.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Airplane!");
    assert!(!runtime.state().pager.has_more());
}

#[tokio::test]
async fn empty_genre_renders_no_movies_message() {
    let backend = catalog(0);
    backend.insert_genre("Western");
    let runtime = open_genre(&backend, "Western").await;

    assert!(runtime.state().pager.is_empty_result());
    let screen = ui::render(runtime.state(), 80);
    assert!(screen.contains("No movies found in Western"), "{screen}");
}

#[tokio::test]
async fn failed_page_keeps_loaded_items_and_retries_on_next_scroll() {
    let backend = catalog(25);
    let mut runtime = open_genre(&backend, "Drama").await;

    backend.fail("movies_by_genre");
    scroll_to_bottom(&mut runtime).await;
    assert_eq!(runtime.state().pager.items().len(), 20);
    assert!(runtime.state().pager.error().is_some());
    assert!(runtime.state().pager.has_more());

    // The sentinel has to leave and re-enter the viewport to fire again.
    backend.recover("movies_by_genre");
    runtime
        .dispatch(Event::Scroll {
            viewport: Span::new(0.0, VIEWPORT),
        })
        .await
        .unwrap();
    assert_eq!(backend.calls("movies_by_genre"), 2);
    scroll_to_bottom(&mut runtime).await;
    assert_eq!(runtime.state().pager.items().len(), 25);
    assert!(runtime.state().pager.error().is_none());
}
