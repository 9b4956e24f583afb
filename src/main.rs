use std::io;

use anyhow::Result;
use classnav::app::{load_or_refresh, App};
use classnav::config::Config;
use classnav::fetch::HttpSource;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    let source = HttpSource::new(config.catalog_url()?);
    let store = load_or_refresh(&config, &source)?;

    let stdin = io::stdin();
    let mut app = App::new(store, stdin.lock(), io::stdout());
    app.run(&mut io::stdout())?;
    Ok(())
}
