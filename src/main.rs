use anyhow::{Context, Result, bail};
use foliomark::{
    Command, Config, CopyOutcome, LinkAction, LinkInterceptor, MarkdownRenderer, MountedNavigator,
    PostBindings, SystemClipboard,
};
use std::fs;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    init_logging();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    match config.command() {
        Command::Build => build(&config),
        Command::Render { file } => {
            let html = render_file(&config, &file)?;
            println!("{}", html);
            Ok(())
        }
        Command::Copy { file, block } => copy(&config, &file, block),
        Command::Check { file, origin } => check(&config, &file, &origin),
    }
}

/// Initialises env_logger, defaulting to info level when `RUST_LOG` is unset.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn build(config: &Config) -> Result<()> {
    let report = foliomark::build(config)?;

    println!("Generated: {}", report.index.display());
    println!("Generated {} post pages", report.posts.len());
    for slug in &report.failed {
        println!("Failed to load post: {}", slug);
    }

    if !config.no_open {
        open::that(&report.index)
            .with_context(|| format!("Failed to open {}", report.index.display()))?;
    }

    Ok(())
}

fn render_file(config: &Config, file: &Path) -> Result<String> {
    let markdown = fs::read_to_string(file)
        .with_context(|| format!("Failed to read markdown file: {}", file.display()))?;
    let highlighter = foliomark::Highlighter::with_theme(&config.theme)
        .with_context(|| format!("Failed to create syntax highlighter with theme: {}", config.theme))?;

    Ok(MarkdownRenderer::with_highlighter(highlighter).render(&markdown))
}

fn copy(config: &Config, file: &Path, block: usize) -> Result<()> {
    let html = render_file(config, file)?;
    let mut bindings = PostBindings::new(LinkInterceptor::new("http://localhost"));
    bindings.attach(&html);

    match bindings.click_copy(block, &mut SystemClipboard, Instant::now())? {
        CopyOutcome::Copied => {
            let lines = bindings.post().code_blocks()[block].rows().len();
            println!("Copied code block {} ({} lines)", block, lines);
            Ok(())
        }
        CopyOutcome::Failed => bail!("Failed to copy code block {}", block),
    }
}

fn check(config: &Config, file: &Path, origin: &str) -> Result<()> {
    let html = render_file(config, file)?;
    let mut bindings = PostBindings::new(LinkInterceptor::new(origin));
    bindings.attach(&html);

    let post = bindings.post().clone();
    let mut navigator = MountedNavigator::new(&post);
    let mut broken = Vec::new();
    let (mut internal, mut external) = (0usize, 0usize);

    for href in post.anchors() {
        match bindings.click_link(href, &mut navigator) {
            LinkAction::ScrollTo(id) if !post.has_target(&id) => broken.push(href.as_str()),
            LinkAction::ScrollTo(_) => {}
            LinkAction::Navigate(_) => internal += 1,
            LinkAction::Default => external += 1,
        }
    }

    for (id, count) in post.duplicate_ids() {
        println!("Heading id used {} times: #{}", count, id);
    }
    for href in &broken {
        println!("Broken fragment link: {}", href);
    }
    println!(
        "Checked {} links ({} in page, {} internal, {} external)",
        post.anchors().len(),
        post.anchors().len() - internal - external,
        internal,
        external
    );

    if !broken.is_empty() {
        bail!("{} fragment links have no target", broken.len());
    }

    Ok(())
}
