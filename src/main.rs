//! Command-line front end.
//!
//! Each subcommand replays the events a user would produce in the catalog UI,
//! lets the runtime settle, then prints the rendered screen:
//!
//! - `home` → `Event::ShowHome`
//! - `search` → `Event::SearchInput`, then the debounce tick fires
//! - `genre --pages N` → `Event::ShowGenre`, then one `Event::Scroll` per extra page
//! - `add` / `update` / `delete` / `review` → the form and dialog events
//!
//! The exit code is non-zero when the screen ends in a failure state (load
//! error, form error, failed search).

use clap::{Parser, Subcommand};
use marquee::api::MovieQuery;
use marquee::domain::{MovieInput, ReviewInput};
use marquee::observability::init_tracing;
use marquee::pagination::Span;
use marquee::search::SearchPhase;
use marquee::ui::components::render_reviews as render_reviews_section;
use marquee::ui::Body;
use marquee::{build_runtime, infrastructure, ui, Config, Event, MarqueeError, Runtime};
use std::path::PathBuf;
use std::process::ExitCode;

/// Height of the simulated window used for genre scrolling.
const VIEWPORT_HEIGHT: f64 = 900.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog service base URL
    #[arg(long, env = "MARQUEE_API_URL")]
    api_url: Option<String>,

    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide admin controls
    #[arg(long)]
    viewer: bool,

    /// Export spans to the default trace file
    #[arg(long)]
    trace: bool,

    /// Render width in columns
    #[arg(long, default_value_t = 100)]
    width: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Genre carousels, optionally filtered
    Home {
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        actor: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Search titles and descriptions
    Search { term: String },
    /// Infinite-scroll grid for one genre
    Genre {
        name: String,
        /// Pages to load by scrolling
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Movie detail with cast and reviews
    Movie { id: i64 },
    /// Only the reviews of a movie
    Reviews { movie_id: i64 },
    Actor { id: i64 },
    Director { id: i64 },
    Actors,
    Directors,
    Genres,
    /// Create a movie
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        director: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        rating: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Edit an existing movie; omitted fields keep their value
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        rating: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a movie (shows the confirmation unless --yes)
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Post a review for a movie
    Review {
        movie_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        rating: f64,
        #[arg(long)]
        comment: Option<String>,
    },
}

fn load_config(args: &Args) -> marquee::Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        config.api_url.clone_from(url);
    }
    if args.viewer {
        config.admin = false;
    }
    if args.trace && config.trace_file.is_none() {
        config.trace_file = infrastructure::default_trace_file();
    }
    Ok(config)
}

async fn open_movie(runtime: &mut Runtime, id: i64) -> marquee::Result<bool> {
    runtime.dispatch(Event::ShowMovie(id)).await?;
    Ok(runtime.state().movie.is_some())
}

async fn scroll_to_end(runtime: &mut Runtime) -> marquee::Result<()> {
    let items = runtime.state().pager.items().len();
    let sentinel = runtime.state().layout.sentinel_span(items);
    let top = (sentinel.bottom() - VIEWPORT_HEIGHT).max(0.0);
    runtime
        .dispatch(Event::Scroll {
            viewport: Span::new(top, VIEWPORT_HEIGHT),
        })
        .await?;
    Ok(())
}

#[tracing::instrument(level = "debug", skip(runtime))]
async fn run(runtime: &mut Runtime, command: Command) -> marquee::Result<()> {
    match command {
        Command::Home {
            genre,
            director,
            actor,
            year,
        } => {
            let filters = (genre.is_some() || director.is_some() || actor.is_some() || year.is_some())
                .then_some(MovieQuery {
                    limit_per_genre: None,
                    genre,
                    director,
                    actor,
                    year,
                });
            runtime.dispatch(Event::ShowHome(filters)).await?;
        }
        Command::Search { term } => {
            runtime.dispatch(Event::ShowHome(None)).await?;
            runtime
                .dispatch(Event::SearchInput {
                    text: term,
                    at: Runtime::now(),
                })
                .await?;
            runtime.run_until_idle().await?;
        }
        Command::Genre { name, pages } => {
            runtime
                .dispatch(Event::Scroll {
                    viewport: Span::new(0.0, VIEWPORT_HEIGHT),
                })
                .await?;
            runtime.dispatch(Event::ShowGenre(name)).await?;
            for _ in 1..pages {
                if !runtime.state().pager.has_more() {
                    break;
                }
                scroll_to_end(runtime).await?;
            }
        }
        Command::Movie { id } | Command::Reviews { movie_id: id } => {
            runtime.dispatch(Event::ShowMovie(id)).await?;
        }
        Command::Actor { id } => {
            runtime.dispatch(Event::ShowActor(id)).await?;
        }
        Command::Director { id } => {
            runtime.dispatch(Event::ShowDirector(id)).await?;
        }
        Command::Actors => {
            runtime.dispatch(Event::ShowActors).await?;
        }
        Command::Directors => {
            runtime.dispatch(Event::ShowDirectors).await?;
        }
        Command::Genres => {
            runtime.dispatch(Event::ShowGenres).await?;
        }
        Command::Add {
            title,
            director,
            year,
            genre,
            rating,
            description,
            language,
            image_url,
        } => {
            let mut input = MovieInput::new(title, director, year, genre);
            input.rating = rating;
            input.description = description;
            input.language = language;
            input.image_url = image_url;
            runtime.dispatch(Event::ShowHome(None)).await?;
            runtime.dispatch(Event::AddMovie).await?;
            runtime.dispatch(Event::SubmitMovie(input)).await?;
        }
        Command::Update {
            id,
            title,
            director,
            year,
            genre,
            rating,
            description,
        } => {
            if !open_movie(runtime, id).await? {
                return Ok(());
            }
            let Some(movie) = runtime.state().movie.clone() else {
                return Ok(());
            };
            let mut input = MovieInput::from_movie(&movie);
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(director) = director {
                input.director_name = director;
            }
            if let Some(year) = year {
                input.release_year = year;
            }
            if let Some(genre) = genre {
                input.genre_name = genre;
            }
            if rating.is_some() {
                input.rating = rating;
            }
            if description.is_some() {
                input.description = description;
            }
            runtime.dispatch(Event::EditMovie(movie)).await?;
            runtime.dispatch(Event::SubmitMovie(input)).await?;
        }
        Command::Delete { id, yes } => {
            if !open_movie(runtime, id).await? {
                return Ok(());
            }
            if let Some(movie) = runtime.state().movie.clone() {
                runtime.dispatch(Event::RequestDelete(movie)).await?;
                if yes {
                    runtime.dispatch(Event::ConfirmDelete).await?;
                }
            }
        }
        Command::Review {
            movie_id,
            name,
            rating,
            comment,
        } => {
            if !open_movie(runtime, movie_id).await? {
                return Ok(());
            }
            let input = ReviewInput {
                movie_id,
                reviewer_name: name,
                rating,
                comment,
            };
            runtime.dispatch(Event::SubmitReview(input)).await?;
        }
    }
    Ok(())
}

/// Whether the settled screen shows a failure.
fn ended_in_failure(runtime: &Runtime) -> bool {
    let state = runtime.state();
    state.load_error.is_some()
        || state.review_error.is_some()
        || state.reviews_error.is_some()
        || state.context.form_error().is_some()
        || matches!(state.search.phase(), SearchPhase::Failed(_))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("marquee: {error}");
            return ExitCode::from(2);
        }
    };
    let _guard = init_tracing(&config);

    let mut runtime = match build_runtime(&config) {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(error = %error, "failed to start");
            eprintln!("marquee: {error}");
            return ExitCode::from(2);
        }
    };

    let reviews_only = matches!(args.command, Command::Reviews { .. });
    if let Err(error) = run(&mut runtime, args.command).await {
        tracing::error!(error = %error, "command failed");
        eprintln!("marquee: {}", describe(&error));
        return ExitCode::FAILURE;
    }

    if reviews_only {
        print!("{}", render_reviews(&runtime, args.width));
    } else {
        print!("{}", ui::render(runtime.state(), args.width));
    }
    if ended_in_failure(&runtime) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Just the review section, or the full screen when the movie didn't load.
fn render_reviews(runtime: &Runtime, cols: usize) -> String {
    let viewmodel = runtime.state().compute_viewmodel();
    let Body::Movie(detail) = &viewmodel.body else {
        return ui::render_viewmodel(&viewmodel, cols);
    };
    let mut out = String::new();
    if let Err(error) = render_reviews_section(
        &mut out,
        detail.reviews.as_deref(),
        detail.reviews_error.as_deref(),
        detail.review_error.as_deref(),
    ) {
        tracing::warn!(error = %error, "failed to render reviews");
    }
    out
}

fn describe(error: &MarqueeError) -> String {
    match error {
        MarqueeError::Transport(_) => format!("{error} (is the catalog service running?)"),
        _ => error.to_string(),
    }
}
