//! Sprout command-line interface.
//!
//! Wires local files to the compiler and merge engine: design JSON in,
//! component files out, with the component registry persisted between runs.

pub mod args;
pub mod config;
pub mod error;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sprout_codegen::{
    component_name, scan_components, ComponentMapping, ComponentRegistry, JsonFileStore,
    MarkupEmitter,
};
use sprout_core::{extract_frames, parse_design, DesignNode};
use sprout_merge::{add_missing_imports, ZoneMerger};

pub use args::{Args, Command};
pub use config::{load_config, parse_config, SproutConfig};
pub use error::{CliError, Result};

/// Run the CLI with parsed arguments.
pub fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref().map(Path::new))?;
    execute(&args.command, &config)
}

/// Execute one command against an already loaded configuration.
pub fn execute(command: &Command, config: &SproutConfig) -> Result<()> {
    match command {
        Command::Render { input, out_dir } => {
            render(config, Path::new(input), Path::new(out_dir))?;
        }
        Command::Register {
            figma_name,
            component,
            path,
            props,
        } => {
            let mapping = props.iter().fold(
                ComponentMapping::new(figma_name, component, path),
                |mapping, (name, value)| mapping.with_prop(name, value.as_str()),
            );
            register(config, mapping)?;
        }
        Command::Scan { dir } => {
            scan(config, Path::new(dir))?;
        }
    }
    Ok(())
}

/// Generate one component per top-level frame of the design at `input`.
///
/// An existing `<Name>.jsx` in `out_dir` is merged rather than overwritten,
/// and any import the new markup needs is added to it. Frames sharing a name
/// are numbered in document order (`Card`, `Card2`, ...). Each component also
/// gets a `<Name>.assets.json` manifest. Returns the component files written.
pub fn render(config: &SproutConfig, input: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    info!(input = input.display().to_string(); "Rendering design");
    let json = fs::read_to_string(input)?;
    let roots = parse_design(&json)?;
    let frames: Vec<&DesignNode> = roots.iter().flat_map(extract_frames).collect();
    if frames.is_empty() {
        info!("No frames found, nothing to render");
        return Ok(Vec::new());
    }

    let registry = ComponentRegistry::open(JsonFileStore::new(&config.registry.path));
    let resolver = config.style.resolver();
    let emitter = MarkupEmitter::new(&resolver, Some(&registry)).with_options(config.codegen.clone());
    let merger = ZoneMerger::new(config.merge.clone());

    fs::create_dir_all(out_dir)?;
    let mut taken: HashSet<String> = HashSet::new();
    let mut written = Vec::with_capacity(frames.len());
    for frame in frames {
        let base = component_name(&frame.name);
        let mut name = base.clone();
        let mut counter = 1;
        while taken.contains(&name) {
            counter += 1;
            name = format!("{}{}", base, counter);
        }
        if counter > 1 {
            warn!(
                frame_id = frame.id.as_str(),
                component = name.as_str();
                "Component name already used in this design, numbering it"
            );
        }
        taken.insert(name.clone());

        let generated = emitter.generate_component(&name, frame);
        let target = out_dir.join(generated.file_name());

        let source = if target.exists() {
            debug!(file = target.display().to_string(); "Merging into existing component");
            let existing = fs::read_to_string(&target)?;
            let merged = merger.merge(&existing, &generated.source);
            add_missing_imports(&merged, &generated.imports)
        } else {
            generated.source.clone()
        };
        fs::write(&target, source)?;

        let manifest = out_dir.join(format!("{}.assets.json", generated.name));
        let mut manifest_text = serde_json::to_string_pretty(&generated.assets)?;
        manifest_text.push('\n');
        fs::write(&manifest, manifest_text)?;

        info!(
            component = generated.name.as_str(),
            assets = generated.assets.len(),
            imports = generated.imports.len();
            "Wrote component"
        );
        written.push(target);
    }

    Ok(written)
}

/// Add or update one registry mapping.
pub fn register(config: &SproutConfig, mapping: ComponentMapping) -> Result<()> {
    let mut registry = ComponentRegistry::open(JsonFileStore::new(&config.registry.path));
    info!(
        figma_name = mapping.figma_name.as_str(),
        component = mapping.component.as_str();
        "Registering component"
    );
    registry.register(mapping)?;
    Ok(())
}

/// Register every component exported under `dir`. Returns how many were
/// found.
pub fn scan(config: &SproutConfig, dir: &Path) -> Result<usize> {
    let mappings = scan_components(dir)?;
    let found = mappings.len();
    let mut registry = ComponentRegistry::open(JsonFileStore::new(&config.registry.path));
    for mapping in mappings {
        registry.register(mapping)?;
    }
    info!(dir = dir.display().to_string(), components = found; "Scanned components");
    Ok(found)
}
