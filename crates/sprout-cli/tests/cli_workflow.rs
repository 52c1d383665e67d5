use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use sprout_cli::{execute, render, Command, SproutConfig};
use tempfile::TempDir;

fn config_in(dir: &Path) -> SproutConfig {
    let mut config = SproutConfig::default();
    config.registry.path = dir.join("component_registry.json");
    config
}

fn write_design(dir: &Path) -> PathBuf {
    let design = json!({
        "document": {
            "id": "0:0",
            "type": "DOCUMENT",
            "name": "Document",
            "children": [{
                "id": "0:1",
                "type": "CANVAS",
                "name": "Page 1",
                "children": [{
                    "id": "1:1",
                    "type": "FRAME",
                    "name": "Profile Card",
                    "absoluteBoundingBox": { "x": 0, "y": 0, "width": 320, "height": 200 },
                    "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }],
                    "layoutMode": "VERTICAL",
                    "itemSpacing": 8,
                    "children": [
                        {
                            "id": "1:2",
                            "type": "TEXT",
                            "name": "Title",
                            "characters": "Hello",
                            "style": { "fontSize": 24, "fontWeight": 700 }
                        },
                        {
                            "id": "1:3",
                            "type": "VECTOR",
                            "name": "Star Icon"
                        },
                        {
                            "id": "1:4",
                            "type": "INSTANCE",
                            "name": "Primary Button"
                        }
                    ]
                }]
            }]
        }
    });
    let path = dir.join("design.json");
    fs::write(&path, serde_json::to_string_pretty(&design).unwrap()).unwrap();
    path
}

#[test]
fn test_render_writes_component_and_manifest() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = write_design(dir.path());
    let out = dir.path().join("src/views");

    let written = render(&config, &input, &out).unwrap();
    assert_eq!(written, vec![out.join("ProfileCard.jsx")]);

    let source = fs::read_to_string(out.join("ProfileCard.jsx")).unwrap();
    assert!(source.starts_with("import React from 'react';\n"));
    assert!(source.contains("{/* @mcp-begin:view */}"));
    assert!(source.contains("{/* @mcp-end:view */}"));
    assert!(source.contains("data-mcp-id=\"1:1\""));
    assert!(source.contains(">Hello</"));
    assert!(source.contains("src=\"/assets/star_icon.svg\""));
    assert!(source.ends_with("export default ProfileCard;\n"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("ProfileCard.assets.json")).unwrap())
            .unwrap();
    assert_eq!(
        manifest,
        json!([{ "id": "1:3", "name": "star_icon", "filename": "star_icon.svg", "type": "svg" }])
    );
}

#[test]
fn test_rerender_is_stable() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = write_design(dir.path());
    let out = dir.path().join("out");

    render(&config, &input, &out).unwrap();
    render(&config, &input, &out).unwrap();
    let second = fs::read_to_string(out.join("ProfileCard.jsx")).unwrap();
    render(&config, &input, &out).unwrap();
    let third = fs::read_to_string(out.join("ProfileCard.jsx")).unwrap();
    assert_eq!(second, third);
}

#[test]
fn test_rerender_adds_import_for_newly_registered_component() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = write_design(dir.path());
    let out = dir.path().join("out");
    let target = out.join("ProfileCard.jsx");

    render(&config, &input, &out).unwrap();
    assert!(!fs::read_to_string(&target).unwrap().contains("import { Button }"));

    execute(
        &Command::Register {
            figma_name: "Button".to_string(),
            component: "Button".to_string(),
            path: "@/components/ui/button".to_string(),
            props: Vec::new(),
        },
        &config,
    )
    .unwrap();
    render(&config, &input, &out).unwrap();

    let source = fs::read_to_string(&target).unwrap();
    assert!(source.contains("<Button data-mcp-id=\"1:4\" />"));
    assert!(source.starts_with(
        "import React from 'react';\nimport { Button } from '@/components/ui/button';\n"
    ));
    assert_eq!(source.matches("import { Button }").count(), 1);

    render(&config, &input, &out).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), source);
}

#[test]
fn test_frames_with_same_name_get_separate_files() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let frame = |id: &str, text: &str| {
        json!({
            "id": id,
            "type": "FRAME",
            "name": "Card",
            "children": [{ "id": format!("{id}:t"), "type": "TEXT", "name": "Body", "characters": text }]
        })
    };
    let design = json!({
        "id": "0:1",
        "type": "CANVAS",
        "name": "Page",
        "children": [frame("1:1", "First"), frame("2:1", "Second")]
    });
    let input = dir.path().join("design.json");
    fs::write(&input, design.to_string()).unwrap();
    let out = dir.path().join("out");

    let written = render(&config, &input, &out).unwrap();
    assert_eq!(written, vec![out.join("Card.jsx"), out.join("Card2.jsx")]);

    let first = fs::read_to_string(out.join("Card.jsx")).unwrap();
    let second = fs::read_to_string(out.join("Card2.jsx")).unwrap();
    assert!(first.contains("First") && !first.contains("Second"));
    assert!(second.contains("Second") && second.contains("export default Card2;"));
    assert!(out.join("Card2.assets.json").exists());
}

#[test]
fn test_rerender_keeps_hand_edits() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = write_design(dir.path());
    let out = dir.path().join("out");
    let target = out.join("ProfileCard.jsx");

    render(&config, &input, &out).unwrap();
    let generated = fs::read_to_string(&target).unwrap();
    let edited = generated
        .replacen(
            "export const ProfileCard",
            "const useProfile = () => null;\n\nexport const ProfileCard",
            1,
        )
        .replacen("className=\"", "className=\"hover:shadow-lg ", 1);
    fs::write(&target, &edited).unwrap();

    render(&config, &input, &out).unwrap();
    let merged = fs::read_to_string(&target).unwrap();
    assert!(merged.contains("const useProfile = () => null;"));
    assert!(merged.contains("hover:shadow-lg"));

    render(&config, &input, &out).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), merged);
}

#[test]
fn test_registered_component_is_used() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = write_design(dir.path());
    let out = dir.path().join("out");

    execute(
        &Command::Register {
            figma_name: "Button".to_string(),
            component: "Button".to_string(),
            path: "@/components/ui/button".to_string(),
            props: vec![("variant".to_string(), "primary".to_string())],
        },
        &config,
    )
    .unwrap();

    render(&config, &input, &out).unwrap();
    let source = fs::read_to_string(out.join("ProfileCard.jsx")).unwrap();
    assert!(source.contains("import { Button } from '@/components/ui/button';"));
    assert!(source.contains("<Button variant=\"primary\" data-mcp-id=\"1:4\" />"));
}

#[test]
fn test_scan_registers_components() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("components")).unwrap();
    fs::write(
        src.join("components/ProfileCard.tsx"),
        "export const ProfileCard = () => null;\n",
    )
    .unwrap();

    execute(
        &Command::Scan {
            dir: src.display().to_string(),
        },
        &config,
    )
    .unwrap();

    let registry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.registry.path).unwrap()).unwrap();
    assert_eq!(registry["mappings"][0]["figma_name"], "Profile Card");
    assert_eq!(registry["mappings"][0]["path"], "@/components/ProfileCard");
}

#[test]
fn test_render_without_frames_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = dir.path().join("text.json");
    fs::write(&input, r#"{"id":"5:1","type":"TEXT","name":"Loose","characters":"x"}"#).unwrap();
    let out = dir.path().join("out");

    assert!(render(&config, &input, &out).unwrap().is_empty());
    assert!(!out.exists());
}

#[test]
fn test_invalid_design_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "[1, 2").unwrap();
    assert!(render(&config_in(dir.path()), &input, &dir.path().join("out")).is_err());
}
