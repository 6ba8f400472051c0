// src/formatting/screen.rs
//! Renders a filtered catalog as terminal text through a Handlebars template.

use super::posters::PosterResolver;
use crate::catalog::FilteredCatalog;
use crate::error::AppError;
use handlebars::Handlebars;
use serde::Serialize;

const SCREEN_TEMPLATE_NAME: &str = "catalog-screen";

const SCREEN_TEMPLATE: &str = concat!(
    "{{#if title}}== {{title}} ==\n{{/if}}",
    "{{total}} items loaded{{#if query}}, filter \"{{query}}\"{{/if}}\n",
    "{{#each entries}}{{position}}. {{name}}  [{{poster}}]\n{{/each}}",
    "{{#if no_results}}No results found\n{{/if}}",
    "{{#if loading}}Loading...\n{{/if}}",
);

/// Everything the screen template needs, flattened for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogScreen {
    pub title: String,
    pub query: String,
    pub total: usize,
    pub entries: Vec<ScreenEntry>,
    pub no_results: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenEntry {
    pub position: usize,
    pub name: String,
    pub poster: String,
}

impl CatalogScreen {
    pub fn build(view: &FilteredCatalog, posters: &PosterResolver) -> Self {
        let entries = view
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| ScreenEntry {
                position: i + 1,
                name: item.name.clone(),
                poster: posters.resolve(item).location().to_string(),
            })
            .collect();

        Self {
            title: view.title.clone(),
            query: view.query.clone(),
            total: view.total_items,
            entries,
            no_results: view.no_results_found,
            loading: view.in_flight,
        }
    }
}

/// Template-backed renderer for catalog screens.
pub struct ScreenRenderer {
    handlebars: Handlebars<'static>,
}

impl ScreenRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(SCREEN_TEMPLATE_NAME, SCREEN_TEMPLATE)
            .map_err(|e| AppError::TemplateRender {
                name: SCREEN_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, screen: &CatalogScreen) -> Result<String, AppError> {
        self.handlebars
            .render(SCREEN_TEMPLATE_NAME, screen)
            .map_err(|e| AppError::TemplateRender {
                name: SCREEN_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })
    }

    /// Builds and renders a screen for `view` in one step.
    pub fn render_view(
        &self,
        view: &FilteredCatalog,
        posters: &PosterResolver,
    ) -> Result<String, AppError> {
        let screen = CatalogScreen::build(view, posters);
        log::debug!(
            "Rendering {} of {} items",
            screen.entries.len(),
            screen.total
        );
        self.render(&screen)
    }
}
