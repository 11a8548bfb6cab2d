use std::process;

use tracing::error;
use tracing_subscriber::EnvFilter;

use photon::{bmp, render, RenderSettings, Result, Scene};

fn run() -> Result<()> {
    let settings = RenderSettings::default();
    let scene = Scene::reference();
    scene.validate()?;

    let frame = render(&scene, &settings);
    bmp::write(&settings.output, &frame.image)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run() {
        error!("{err}");
        process::exit(err.exit_code());
    }
}
