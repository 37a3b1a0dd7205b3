use gavel::{App, AppConfig, Cli, console::Terminal, demo};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    // Events go to stderr so they never interleave with the interactive
    // console on stdout. Only warnings are shown unless RUST_LOG says otherwise.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Help and version requests surface as clap errors too; let clap print
    // them and pick the exit code.
    let cli = Cli::import().unwrap_or_else(|e| e.exit());

    let AppConfig {
        demo: demo_config,
        fees,
    } = AppConfig::load(&cli)?;

    let color = std::env::var_os("NO_COLOR").is_none();
    let mut app = App::new(Terminal::stdio().with_color(color), fees);

    if demo_config.enabled {
        let (registry, catalog) = app.stores_mut();
        demo::seed(registry, catalog, &demo_config, &mut rand::rng())?;
    }

    app.run()?;
    Ok(())
}
