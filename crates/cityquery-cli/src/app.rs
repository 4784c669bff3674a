//! Command-line arguments and the pipeline they drive

use crate::config::CliConfig;
use anyhow::{Context, Result};
use cityquery_core::{BuildingAttributes, SelectionContext};
use cityquery_query::{QueryEngine, QueryPlan};
use cityquery_scene::{
    Scene, export_records, load_rows, select_objects_in_camera_view, write_records,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "cityquery",
    version,
    about = "Select city-model buildings with natural-language commands"
)]
pub struct Args {
    /// Scene file (JSON); an empty scene is used when omitted
    #[arg(value_name = "SCENE")]
    pub scene: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "JSON file of building rows to import")]
    pub import: Option<PathBuf>,

    #[arg(long, help = "Remove all objects before importing")]
    pub clear: bool,

    #[arg(long, help = "Join surfaces sharing a base name after import")]
    pub merge: bool,

    #[arg(long, help = "Split meshes into loose parts after import")]
    pub separate: bool,

    #[arg(long, help = "Select every object before running the query")]
    pub select_all: bool,

    #[arg(long, help = "Start from the objects visible to the scene camera")]
    pub visible: bool,

    #[arg(short, long, value_name = "TEXT", help = "Selection command")]
    pub query: Option<String>,

    #[arg(long, help = "Print the attributes of the first selected object")]
    pub inspect: bool,

    #[arg(long, value_name = "FILE", help = "Write building export records")]
    pub export: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Save the resulting scene")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Configuration file (JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", help = "Log filter, overrides the configuration")]
    pub log_level: Option<String>,
}

impl Args {
    /// Configuration file merged with command-line overrides
    pub fn load_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => CliConfig::default(),
        };
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

/// What a run produced
#[derive(Debug, Default)]
pub struct Report {
    pub plan: Option<QueryPlan>,
    pub selected: Vec<String>,
    pub inspected: Option<BuildingAttributes>,
    pub exported: usize,
}

/// Run the pipeline: load, import, select, query, export
pub fn run(args: &Args, config: &CliConfig) -> Result<Report> {
    let mut scene = match &args.scene {
        Some(path) => Scene::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => Scene::new(),
    };

    if let Some(path) = &args.import {
        let rows = load_rows(path)
            .with_context(|| format!("failed to read rows {}", path.display()))?;
        if args.clear {
            scene.clear();
        }
        scene.import_rows(&rows).context("failed to import rows")?;
    }
    if args.merge {
        scene.merge_surfaces();
    }
    if args.separate {
        scene.separate_surfaces();
    }

    if args.select_all {
        let all = scene.all_objects();
        scene.select_only(&all);
    }
    if args.visible {
        select_objects_in_camera_view(&mut scene, &config.visibility)
            .context("visibility selection failed")?;
    }

    let mut report = Report::default();

    if let Some(query) = &args.query {
        let engine = QueryEngine::new(config.query.clone());
        let result = engine
            .run(query, &mut scene)
            .with_context(|| format!("query '{}' failed", query))?;
        report.plan = Some(result.plan);
    }

    report.selected = scene
        .selected_objects()
        .into_iter()
        .filter_map(|id| scene.object(id).map(|o| o.name.clone()))
        .collect();

    if args.inspect {
        report.inspected = scene.inspect_selected();
    }

    if let Some(path) = &args.export {
        let records = export_records(&scene);
        write_records(path, &records)
            .with_context(|| format!("failed to export to {}", path.display()))?;
        report.exported = records.len();
    }

    if let Some(path) = &args.output {
        scene
            .save(path)
            .with_context(|| format!("failed to save scene {}", path.display()))?;
        info!("Saved scene to {}", path.display());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ROWS: &str = r#"[
        {"building_id": 1, "gmlid": "TALL", "height": 45.0, "year_of_construction": "1930-01-01",
         "geometry": "{\"type\": \"Polygon\", \"coordinates\": [[[0, -10, 0], [5, -10, 0], [5, -5, 0]]]}"},
        {"building_id": 2, "gmlid": "SHORT", "height": 9.0, "year_of_construction": "1975-01-01",
         "geometry": "{\"type\": \"Polygon\", \"coordinates\": [[[0, 5, 0], [5, 5, 0], [5, 10, 0]]]}"}
    ]"#;

    fn write_rows(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("rows.json");
        fs::write(&path, ROWS).unwrap();
        path
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "cityquery",
            "scene.json",
            "--query",
            "select the highest building",
            "--visible",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(args.query.as_deref(), Some("select the highest building"));
        assert!(args.visible);
        assert_eq!(args.load_config().unwrap().log_level, "debug");
    }

    #[test]
    fn test_import_and_query() {
        let dir = TempDir::new().unwrap();
        let args = Args {
            import: Some(write_rows(&dir)),
            select_all: true,
            query: Some("select the high buildings".to_string()),
            inspect: true,
            ..Default::default()
        };

        let report = run(&args, &CliConfig::default()).unwrap();
        assert_eq!(report.selected, vec!["TALL".to_string()]);
        assert_eq!(report.inspected.unwrap().height, Some(45.0));
        assert_eq!(report.plan.unwrap().predicates.len(), 1);
    }

    #[test]
    fn test_export_and_save() {
        let dir = TempDir::new().unwrap();
        let export = dir.path().join("export.json");
        let output = dir.path().join("scene.json");
        let args = Args {
            import: Some(write_rows(&dir)),
            export: Some(export.clone()),
            output: Some(output.clone()),
            ..Default::default()
        };

        let report = run(&args, &CliConfig::default()).unwrap();
        assert_eq!(report.exported, 2);
        assert!(report.selected.is_empty());
        assert_eq!(Scene::load(&output).unwrap().len(), 2);
        assert!(fs::read_to_string(&export).unwrap().contains("MULTIPOLYGON Z"));
    }

    #[test]
    fn test_visible_without_camera_fails() {
        let args = Args {
            visible: true,
            ..Default::default()
        };
        let err = run(&args, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("visibility"));
    }

    #[test]
    fn test_missing_scene_file() {
        let args = Args {
            scene: Some(PathBuf::from("/nonexistent/scene.json")),
            ..Default::default()
        };
        assert!(run(&args, &CliConfig::default()).is_err());
    }
}
