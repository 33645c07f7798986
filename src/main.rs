mod actions;
mod app;
mod assets;
mod commodities;
mod config;
mod cycle;
mod derived;
mod incidents;
mod render;
mod reveal;
mod stations;
mod store;
mod theme;
mod view;

use app::BriefingApp;
use config::PresentationConfig;
use render::DocumentPhase;
use std::path::PathBuf;
use store::Store;

fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    // Data and image assets live next to the binary unless a
    // directory is given on the command line; `--projector` selects
    // the high-contrast presentation variant.
    let mut data_dir = PathBuf::from(".");
    let mut config = PresentationConfig::standard();
    for arg in std::env::args().skip(1) {
        if arg == "--projector" {
            config = PresentationConfig::projector();
        } else {
            data_dir = PathBuf::from(arg);
        }
    }

    // The one-shot fetch happens before the first pass; an unreadable
    // table halts the session, there is no partial-panel fallback.
    log::debug!("document phase: {:?}", DocumentPhase::Loading);
    let table_path = data_dir.join("data.csv");
    let incidents =
        match incidents::load_incident_table(&table_path) {
            Ok(rows) => rows,
            Err(err) => {
                log::error!(
                    "document phase: {:?}: {err}",
                    DocumentPhase::Failed
                );
                eprintln!("fatal: {err}");
                std::process::exit(1);
            }
        };

    let store = Store::new(incidents);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Camden Borough Protection Strategy",
        options,
        Box::new(move |cc| {
            Ok(Box::new(BriefingApp::new(
                cc, store, config, &data_dir,
            )))
        }),
    )
}
