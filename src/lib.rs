//! Status-aware tab labels for build views.
//!
//! Given a view (possibly nesting other views), count its jobs by latest
//! status and produce the label to show on the view's tab when it is active
//! and when it is not, plus a suggested tab colour.
//!
//! Labels come from patterns with these tokens:
//!
//! | Token | Replaced with |
//! |-------|---------------|
//! | `$N1` | view name |
//! | `$N2` | view name cut to `shortNameLength` characters, with a trailing `.` |
//! | `$N3` | view name with `nameRegexMatch` replaced by `nameRegexReplacement` |
//! | `$T`  | total jobs |
//! | `$F`  | failed jobs |
//! | `$D`  | disabled jobs |
//! | `$U`  | unstable jobs |
//! | `$S`  | successful jobs |
//!
//! ```
//! use view_tabs::{render_tab, ColourConfig, Grouping, Job, StatusColour, TemplateConfig};
//!
//! let view: Grouping = Grouping::Leaf {
//!     name: "display name".to_string(),
//!     jobs: vec![
//!         Job::new("build", &[StatusColour::Success]),
//!         Job::new("test", &[StatusColour::Failed]),
//!     ],
//! };
//! let template = TemplateConfig {
//!     pattern_active_tab: "$N2 ($F/$T)".to_string(),
//!     ..Default::default()
//! };
//! let colours = ColourConfig {
//!     failed: "ff0000".to_string(),
//!     ..Default::default()
//! };
//!
//! let tab = render_tab(Some(&view), "display name", &template, &colours).unwrap();
//! assert_eq!(tab.active_label, "dis. (1/2)");
//! assert_eq!(tab.inactive_label, "display name");
//! assert_eq!(tab.colour, "ff0000");
//! ```

pub mod colour;
pub mod config;
pub mod count;
pub mod error;
pub mod label;
pub mod tab;
pub mod view;

pub use colour::{colour_options_for, ColourConfig, ColourField, ColourOption};
pub use config::{TabBarConfig, TemplateConfig};
pub use count::JobStatusCount;
pub use error::{Error, Result};
pub use label::LabelGenerator;
pub use tab::{render_tab, RenderedTab, TabBar};
pub use view::{items_in_view, Grouping, Job, StatusColour, WorkItem};
