// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::error::NadeError;
use crate::file_io::{list_image_names, load_template, write_output};
use crate::nade::ParsedNade;
use crate::template::Template;
use crate::types::{Map, Side, ThrowModifier, Vocabulary};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a page template can reference.
#[derive(Debug, Serialize)]
pub struct PageData<'a> {
    pub all_maps: Vec<Map>,
    pub all_sides: Vec<Side>,
    /// Map token -> side token -> display name -> nade.
    pub nades: &'a Catalog,
    pub labels: Labels,
}

/// Human readable names keyed by token.
#[derive(Debug, Serialize)]
pub struct Labels {
    pub maps: IndexMap<Map, &'static str>,
    pub sides: IndexMap<Side, &'static str>,
    pub throw_mods: IndexMap<ThrowModifier, &'static str>,
}

impl Labels {
    fn of<V: Vocabulary + std::hash::Hash + Eq>() -> IndexMap<V, &'static str> {
        V::all().into_iter().map(|v| (v, v.label())).collect()
    }
}

impl<'a> PageData<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            all_maps: Map::all(),
            all_sides: Side::all(),
            nades: catalog,
            labels: Labels {
                maps: Labels::of(),
                sides: Labels::of(),
                throw_mods: Labels::of(),
            },
        }
    }
}

/// Renders the catalog page with `template`.
pub fn export_page(catalog: &Catalog, template: &Template) -> Result<String, NadeError> {
    template.render(&PageData::new(catalog))
}

/// Parses every filename, stopping at the first one that fails.
pub fn parse_images(filenames: &[String]) -> Result<Vec<ParsedNade>, NadeError> {
    filenames
        .iter()
        .map(|filename| ParsedNade::parse_filename(filename))
        .collect()
}

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub images: usize,
    pub nades: usize,
    pub output_path: PathBuf,
}

/// Runs the whole pipeline: list images, parse, group, render, write.
///
/// Nothing is written unless every step before it succeeded.
pub fn build_site(config: &SiteConfig) -> Result<BuildSummary, NadeError> {
    let filenames = list_image_names(&config.image_dir)?;
    let records = parse_images(&filenames)?;
    let catalog = Catalog::from_records(records);

    let template = load_template(&config.template_path)?;
    let page = export_page(&catalog, &template)?;
    write_output(&config.output_path, &page)?;

    Ok(BuildSummary {
        images: filenames.len(),
        nades: catalog.len(),
        output_path: config.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const LIST_TEMPLATE: &str = "{{ each all_maps |map| }}{{ each all_sides |side| }}\
{{ each nades.[map].[side] |entry| }}{{ map }}/{{ side }}/{{ entry.key }}:\
{{ each entry.value.throw_mods |m| }}{{ m }}{{ if not loop.last }}+{{ /if }}{{ /each }}=\
{{ each entry.value.images |img| }}{{ img }};{{ /each }}\n{{ /each }}{{ /each }}{{ /each }}";

    fn site(images: &[&str], template: &str) -> (TempDir, SiteConfig) {
        let dir = tempdir().unwrap();
        let image_dir = dir.path().join("img");
        fs::create_dir(&image_dir).unwrap();
        for image in images {
            fs::write(image_dir.join(image), b"").unwrap();
        }
        let template_path = dir.path().join("index-template.html");
        fs::write(&template_path, template).unwrap();
        let config = SiteConfig::new(image_dir, template_path, dir.path().join("index.html"));
        (dir, config)
    }

    #[test]
    fn test_page_data_shape() {
        let catalog = Catalog::new();
        let value = serde_json::to_value(PageData::new(&catalog)).unwrap();
        assert_eq!(
            value["all_maps"],
            serde_json::json!(["inferno", "dust2", "ancient", "mirage", "train", "nuke", "overpass"])
        );
        assert_eq!(value["all_sides"], serde_json::json!(["t", "ct"]));
        assert_eq!(value["nades"]["nuke"]["ct"], serde_json::json!({}));
        assert_eq!(value["labels"]["throw_mods"]["lc"], "Left click");
        assert_eq!(value["labels"]["maps"]["dust2"], "Dust II");
    }

    #[test]
    fn test_page_data_nade_fields() {
        let catalog = Catalog::from_records(
            parse_images(&["mirage_ct_lc-jump_window_1.jpg".to_owned()]).unwrap(),
        );
        let value = serde_json::to_value(PageData::new(&catalog)).unwrap();
        assert_eq!(
            value["nades"]["mirage"]["ct"]["window"],
            serde_json::json!({
                "map": "mirage",
                "side": "ct",
                "throw_mods": ["lc", "jump"],
                "name": "window",
                "images": ["mirage_ct_lc-jump_window_1.jpg"],
            })
        );
    }

    #[test]
    fn test_build_site_writes_grouped_page() {
        let (_dir, config) = site(
            &[
                "dust2_t_w_long-a-pop_2.png",
                "dust2_t_w_long-a-pop_1.png",
                "mirage_ct_lc-jump_window_1.jpg",
            ],
            LIST_TEMPLATE,
        );

        let summary = build_site(&config).unwrap();
        assert_eq!(summary.images, 3);
        assert_eq!(summary.nades, 2);

        let page = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(
            page,
            "dust2/t/long a pop:w=dust2_t_w_long-a-pop_1.png;dust2_t_w_long-a-pop_2.png;\n\
             mirage/ct/window:lc+jump=mirage_ct_lc-jump_window_1.jpg;\n"
        );
    }

    #[test]
    fn test_build_site_empty_directory() {
        let (_dir, config) = site(&[], "{{ if nades.dust2.t }}some{{ else }}none{{ /if }}");
        let summary = build_site(&config).unwrap();
        assert_eq!(summary.nades, 0);
        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "none");
    }

    #[test]
    fn test_build_site_unknown_token_writes_nothing() {
        let (_dir, config) = site(
            &["dust2_t_w_long-a-pop_1.png", "nuke_t_badtoken_site_1.png"],
            LIST_TEMPLATE,
        );
        match build_site(&config) {
            Err(NadeError::UnknownToken { token, .. }) => assert_eq!(token, "badtoken"),
            other => panic!("expected UnknownToken, got {other:?}"),
        }
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_build_site_malformed_name_aborts() {
        let (_dir, config) = site(&["readme.txt"], LIST_TEMPLATE);
        assert!(matches!(
            build_site(&config),
            Err(NadeError::MalformedFilename { .. })
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_build_site_render_error_keeps_previous_output() {
        let (_dir, config) = site(&[], "{{ nades.vertigo }}");
        fs::write(&config.output_path, "previous").unwrap();
        assert!(matches!(
            build_site(&config),
            Err(NadeError::Template { .. })
        ));
        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "previous");
    }

    #[test]
    fn test_build_site_missing_template() {
        let (_dir, mut config) = site(&[], "");
        config.template_path = config.template_path.with_file_name("nope.html");
        assert!(matches!(build_site(&config), Err(NadeError::Io { .. })));
    }
}
