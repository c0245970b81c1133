//! Command-line driver: load a PDB file, optionally import saved views,
//! animate through every saved view and print the view records as JSON.
//!
//! ```text
//! vantage <structure.pdb> [views.json]
//! vantage --schema
//! ```
//!
//! Options are read from `vantage.toml` in the working directory when it
//! exists.

use std::io::Write;
use std::path::Path;

use vantage::scene::AnimationPhase;
use vantage::view::{records_from_json, records_to_json};
use vantage::{Options, Scene, Structure, VantageError};

const OPTIONS_FILE: &str = "vantage.toml";

fn load_options() -> Result<Options, VantageError> {
    let path = Path::new(OPTIONS_FILE);
    if path.exists() {
        log::info!("reading options from {OPTIONS_FILE}");
        Options::load(path)
    } else {
        Ok(Options::default())
    }
}

fn print_schema() -> Result<(), VantageError> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
    writeln!(std::io::stdout().lock(), "{schema}")?;
    Ok(())
}

fn run(pdb_path: &str, views_path: Option<&str>) -> Result<(), VantageError> {
    let options = load_options()?;
    let text = std::fs::read_to_string(pdb_path)?;
    let pdb_id = Path::new(pdb_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("structure");
    let structure = Structure::from_pdb(pdb_id, &text, &options)?;
    let mut scene = Scene::new(structure, options);

    if let Some(views_path) = views_path {
        let json = std::fs::read_to_string(views_path)?;
        let _ = scene.load_view_records(records_from_json(&json)?);
    }

    let ids: Vec<String> =
        scene.saved_views().iter().map(|v| v.id.clone()).collect();
    for id in &ids {
        if !scene.set_target_view_by_id(id) {
            continue;
        }
        let mut frames = 1;
        while scene.tick() != AnimationPhase::Idle {
            frames += 1;
        }
        scene.mark_rendered();
        log::info!(
            "view {id}: {frames} frames, centred on {}",
            scene.current_view().res_id
        );
    }

    let json = records_to_json(&scene.view_records())?;
    writeln!(std::io::stdout().lock(), "{json}")?;
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("--schema") => print_schema(),
        Some(pdb_path) => run(pdb_path, args.get(1).map(String::as_str)),
        None => {
            log::error!("Usage: vantage <structure.pdb> [views.json]");
            std::process::exit(1);
        }
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
