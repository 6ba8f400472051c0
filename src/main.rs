// src/main.rs

use catalog_scroll::{
    AppError, CatalogConfig, CatalogController, CatalogEvent, CatalogHttpClient,
    CommandLineInput, DispatchOutcome, FixtureDirectory, PageOrigin, PageSource, PosterResolver,
    ProximitySubscription, ScreenRenderer, ScrollMetrics,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("catalog_scroll.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Logs go to stderr so the rendered catalog on stdout stays clean.
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the page source the configuration points at.
fn open_page_source(config: &CatalogConfig) -> Result<Arc<dyn PageSource>, AppError> {
    let source: Arc<dyn PageSource> = match &config.origin {
        PageOrigin::Http(base_url) => {
            log::info!("Loading catalog pages from {}", base_url);
            Arc::new(CatalogHttpClient::new(
                base_url.clone(),
                config.request_timeout,
            )?)
        }
        PageOrigin::Fixtures(dir) => {
            log::info!("Loading catalog pages from fixtures in {}", dir.display());
            Arc::new(FixtureDirectory::open(dir.clone())?)
        }
    };
    Ok(source)
}

/// Reports fetch failures and exhaustion to the user as they happen.
fn spawn_event_reporter(controller: &CatalogController) {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(CatalogEvent::FetchFailed {
                    page_index,
                    message,
                }) => {
                    eprintln!("⚠️  Page {} could not be loaded: {}", page_index, message);
                }
                Ok(CatalogEvent::Exhausted) => {
                    eprintln!("✓ Reached the end of the catalog.");
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("Event reporter skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Interactive catalog session: renders, then reacts to stdin commands.
struct CatalogSession {
    controller: CatalogController,
    renderer: ScreenRenderer,
    posters: PosterResolver,
}

impl CatalogSession {
    fn new(config: &CatalogConfig) -> Result<Self, AppError> {
        let source = open_page_source(config)?;
        let controller = CatalogController::new(source, config.scheduler_policy());
        if let Some(query) = &config.initial_query {
            controller.set_query(query.clone());
        }
        Ok(Self {
            controller,
            renderer: ScreenRenderer::new()?,
            posters: PosterResolver::new(config.image_base.clone(), config.placeholder.clone()),
        })
    }

    fn redraw(&self) -> Result<(), AppError> {
        let text = self
            .renderer
            .render_view(&self.controller.view(), &self.posters)?;
        println!("{}", text);
        Ok(())
    }

    /// Pretends the viewport was scrolled to the bottom of the rendered rows.
    async fn scroll_to_end(&self, subscription: &mut ProximitySubscription) {
        let rendered = self.controller.view().items.len() as u32;
        let metrics = ScrollMetrics {
            scroll_offset: rendered,
            viewport_height: 1,
            last_item_offset: rendered.checked_sub(1),
        };

        if !self.controller.detector().observe(metrics) {
            let snapshot = self.controller.snapshot();
            if !snapshot.has_more {
                println!("(no more pages)");
            } else if rendered == 0 {
                println!("(nothing rendered to scroll past; clear the filter first)");
            }
            return;
        }

        for outcome in self.controller.drain_signals(subscription).await {
            if let DispatchOutcome::Rejected(reason) = outcome {
                log::debug!("Scroll ignored: {}", reason);
            }
        }
    }

    async fn run(&self) -> Result<(), AppError> {
        let mut subscription = self.controller.detector().subscribe();

        self.controller.start().await;
        self.redraw()?;
        println!("Enter text to filter, an empty line or :more to scroll, :clear, :q to quit.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                ":q" | ":quit" => break,
                "" | ":more" => self.scroll_to_end(&mut subscription).await,
                ":clear" => self.controller.set_query(""),
                query => self.controller.set_query(query),
            }
            self.redraw()?;
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = CatalogConfig::resolve(cli)?;
    log::debug!("Resolved configuration: {:?}", config);

    let session = CatalogSession::new(&config)?;
    spawn_event_reporter(&session.controller);
    session.run().await?;

    Ok(())
}
