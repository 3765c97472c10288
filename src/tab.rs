// Rendering a view into tab labels and colour

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use crate::colour::{ColourConfig, ColourField, ColourOption};
use crate::config::{TabBarConfig, TemplateConfig};
use crate::count::JobStatusCount;
use crate::error::Result;
use crate::label::LabelGenerator;
use crate::view::{items_in_view, Grouping, WorkItem};

/// What the host needs to draw one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTab {
    pub active_label: String,
    pub inactive_label: String,
    /// Hex colour without the leading `#`, or empty for no colour.
    pub colour: String,
}

pub fn render_tab<T: WorkItem>(
    view: Option<&Grouping<T>>,
    display_name: &str,
    template: &TemplateConfig,
    colours: &ColourConfig,
) -> Result<RenderedTab> {
    let items = items_in_view(view);
    let count = JobStatusCount::from_items(&items);
    let generator = LabelGenerator::from_config(template)?;

    let tab = RenderedTab {
        active_label: generator.tab_label(
            display_name,
            &count,
            &template.pattern_active_tab,
            template.condition_active_tab,
        ),
        inactive_label: generator.tab_label(
            display_name,
            &count,
            &template.pattern_inactive_tab,
            template.condition_inactive_tab,
        ),
        colour: colours.colour_for(&count).to_string(),
    };

    log::debug!("view {:?}: {:?} -> {:?}", display_name, count, tab);
    Ok(tab)
}

/// Tab bar settings shared between one writer and any number of renders.
/// Each render works from the snapshot current when it started.
#[derive(Debug, Default)]
pub struct TabBar {
    config: RwLock<Arc<TabBarConfig>>,
}

impl TabBar {
    pub fn new(config: TabBarConfig) -> Self {
        TabBar {
            config: RwLock::new(Arc::new(config)),
        }
    }

    pub fn snapshot(&self) -> Arc<TabBarConfig> {
        Arc::clone(&self.config.read())
    }

    /// Apply submitted form data. On error the current settings stay in place.
    pub fn configure(&self, form: &Value) -> Result<()> {
        let mut config = self.config.write();
        let updated = config.merge_form(form)?;
        log::debug!("tab bar reconfigured: {:?}", updated);
        *config = Arc::new(updated);
        Ok(())
    }

    pub fn tab_data<T: WorkItem>(&self, view: &Grouping<T>) -> Result<RenderedTab> {
        let config = self.snapshot();
        render_tab(Some(view), view.display_name(), &config.template, &config.colours)
    }

    pub fn colour_options(&self, field: ColourField) -> Vec<ColourOption> {
        self.snapshot().colours.options_for(field)
    }
}
