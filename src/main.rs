//! Marbleworks entry point

use std::path::Path;

use anyhow::bail;

use marbleworks::app::{self, DemoKind};
use marbleworks::demos::{MarblesDemo, SceneDemo, TriangleDemo};
use marbleworks::settings::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let kind = match std::env::args().nth(1).as_deref() {
        None | Some("marbles") => DemoKind::Marbles,
        Some("triangle") => DemoKind::Triangle,
        Some("scene") => DemoKind::Scene,
        Some(other) => {
            bail!("unknown demo '{other}'; expected one of: triangle, scene, marbles");
        }
    };

    let settings = Settings::load_or_default(Path::new("settings.json"));
    log::info!("starting {} demo", kind.title());

    app::run(kind, settings, move |gpu, settings| match kind {
        DemoKind::Triangle => Box::new(TriangleDemo::new(gpu)),
        DemoKind::Scene => Box::new(SceneDemo::new(gpu, settings)),
        DemoKind::Marbles => Box::new(MarblesDemo::new(gpu, settings)),
    })
}
