// View tree model and item extraction

use serde::{Deserialize, Serialize};

/// Outcome of the most recent run of a job, as shown by its status icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusColour {
    Success,
    Unstable,
    Failed,
    Disabled,
    Other,
}

impl StatusColour {
    /// Map a host icon colour name onto a status.
    /// In-progress (`*_anime`) and never-built colours land in `Other`.
    pub fn from_ball_colour(colour: &str) -> Self {
        match colour.to_ascii_lowercase().as_str() {
            "blue" => Self::Success,
            "yellow" => Self::Unstable,
            "red" => Self::Failed,
            "disabled" => Self::Disabled,
            _ => Self::Other,
        }
    }

    fn ball_colour(&self) -> &'static str {
        match self {
            Self::Success => "blue",
            Self::Unstable => "yellow",
            Self::Failed => "red",
            Self::Disabled => "disabled",
            Self::Other => "grey",
        }
    }
}

impl From<String> for StatusColour {
    fn from(colour: String) -> Self {
        Self::from_ball_colour(&colour)
    }
}

impl From<StatusColour> for String {
    fn from(status: StatusColour) -> Self {
        status.ball_colour().to_string()
    }
}

/// Anything whose latest outcome can be classified.
pub trait WorkItem {
    /// Status history, most relevant first. May be empty.
    fn statuses(&self) -> &[StatusColour];

    /// Only the first history entry is ever consulted.
    fn current_status(&self) -> Option<StatusColour> {
        self.statuses().first().copied()
    }
}

/// A job as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub statuses: Vec<StatusColour>,
}

impl Job {
    pub fn new(name: &str, statuses: &[StatusColour]) -> Self {
        Job {
            name: name.to_string(),
            statuses: statuses.to_vec(),
        }
    }
}

impl WorkItem for Job {
    fn statuses(&self) -> &[StatusColour] {
        &self.statuses
    }
}

/// A view: either a plain list of jobs or a container of nested views.
///
/// In JSON a view carries exactly one of `views` or `jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    untagged,
    try_from = "RawGrouping<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub enum Grouping<T = Job> {
    Nested { name: String, views: Vec<Grouping<T>> },
    Leaf { name: String, jobs: Vec<T> },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrouping<T> {
    name: String,
    views: Option<Vec<Grouping<T>>>,
    jobs: Option<Vec<T>>,
}

impl<T> TryFrom<RawGrouping<T>> for Grouping<T> {
    type Error = String;

    fn try_from(raw: RawGrouping<T>) -> Result<Self, Self::Error> {
        match (raw.views, raw.jobs) {
            (Some(views), None) => Ok(Grouping::Nested { name: raw.name, views }),
            (None, Some(jobs)) => Ok(Grouping::Leaf { name: raw.name, jobs }),
            (Some(_), Some(_)) => Err(format!("view {:?} has both views and jobs", raw.name)),
            (None, None) => Err(format!("view {:?} has neither views nor jobs", raw.name)),
        }
    }
}

impl<T> Grouping<T> {
    pub fn display_name(&self) -> &str {
        match self {
            Grouping::Nested { name, .. } | Grouping::Leaf { name, .. } => name,
        }
    }
}

/// Collect every job in a view, descending into nested views depth-first.
/// Jobs come back in pre-order, each container's children in definition order.
/// Cycles are not detected; the tree is owned, so none can be built.
pub fn items_in_view<T>(view: Option<&Grouping<T>>) -> Vec<&T> {
    let mut items = Vec::new();
    if let Some(view) = view {
        collect_items(view, &mut items, 0);
    }
    items
}

fn collect_items<'a, T>(view: &'a Grouping<T>, items: &mut Vec<&'a T>, depth: usize) {
    match view {
        Grouping::Nested { name, views } => {
            log::trace!("descending into nested view {:?} at depth {}", name, depth);
            for child in views {
                collect_items(child, items, depth + 1);
            }
        }
        Grouping::Leaf { jobs, .. } => items.extend(jobs.iter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_leaf(name: &str, jobs: &[&str]) -> Grouping {
        Grouping::Leaf {
            name: name.to_string(),
            jobs: jobs.iter().map(|j| Job::new(j, &[])).collect(),
        }
    }

    fn names(items: &[&Job]) -> Vec<String> {
        items.iter().map(|j| j.name.clone()).collect()
    }

    #[test]
    fn test_items_in_view() {
        let view = make_leaf("v", &["a", "b", "c"]);
        assert_eq!(items_in_view(Some(&view)).len(), 3);
    }

    #[test]
    fn test_items_in_empty_view() {
        let view = make_leaf("v", &[]);
        assert!(items_in_view(Some(&view)).is_empty());

        let nested: Grouping = Grouping::Nested {
            name: "n".to_string(),
            views: vec![],
        };
        assert!(items_in_view(Some(&nested)).is_empty());
    }

    #[test]
    fn test_items_in_absent_view() {
        assert!(items_in_view::<Job>(None).is_empty());
    }

    #[test]
    fn test_items_in_nested_view() {
        let nested = Grouping::Nested {
            name: "n".to_string(),
            views: vec![make_leaf("v", &["a", "b", "c", "d"])],
        };
        assert_eq!(names(&items_in_view(Some(&nested))), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_items_in_view_preorder() {
        let tree = Grouping::Nested {
            name: "root".to_string(),
            views: vec![
                make_leaf("first", &["a", "b"]),
                Grouping::Nested {
                    name: "inner".to_string(),
                    views: vec![make_leaf("deep", &["c"]), make_leaf("empty", &[])],
                },
                make_leaf("last", &["d"]),
            ],
        };

        let first = names(&items_in_view(Some(&tree)));
        assert_eq!(first, vec!["a", "b", "c", "d"]);

        // Repeated calls give the same order
        assert_eq!(names(&items_in_view(Some(&tree))), first);
    }

    #[test]
    fn test_ball_colours() {
        assert_eq!(StatusColour::from_ball_colour("blue"), StatusColour::Success);
        assert_eq!(StatusColour::from_ball_colour("YELLOW"), StatusColour::Unstable);
        assert_eq!(StatusColour::from_ball_colour("red"), StatusColour::Failed);
        assert_eq!(StatusColour::from_ball_colour("disabled"), StatusColour::Disabled);
        assert_eq!(StatusColour::from_ball_colour("blue_anime"), StatusColour::Other);
        assert_eq!(StatusColour::from_ball_colour("notbuilt"), StatusColour::Other);
        assert_eq!(StatusColour::from_ball_colour(""), StatusColour::Other);
    }

    #[test]
    fn test_current_status_is_first_entry() {
        let job = Job::new("j", &[StatusColour::Failed, StatusColour::Success]);
        assert_eq!(job.current_status(), Some(StatusColour::Failed));
        assert_eq!(Job::new("j", &[]).current_status(), None);
    }

    #[test]
    fn test_grouping_from_json() {
        let json = r#"{
            "name": "All",
            "views": [
                { "name": "Core", "jobs": [ { "name": "build", "statuses": ["red", "blue"] } ] },
                { "name": "Docs", "jobs": [ { "name": "site" } ] }
            ]
        }"#;
        let view: Grouping = serde_json::from_str(json).unwrap();
        assert_eq!(view.display_name(), "All");

        let items = items_in_view(Some(&view));
        assert_eq!(names(&items), vec!["build", "site"]);
        assert_eq!(items[0].current_status(), Some(StatusColour::Failed));
        assert_eq!(items[1].current_status(), None);
    }

    #[test]
    fn test_grouping_json_needs_one_kind() {
        let both = r#"{ "name": "Mixed", "views": [], "jobs": [ { "name": "build" } ] }"#;
        let err = serde_json::from_str::<Grouping>(both).unwrap_err();
        assert!(err.to_string().contains("both views and jobs"));

        let neither = r#"{ "name": "Bare" }"#;
        assert!(serde_json::from_str::<Grouping>(neither).is_err());
    }

    #[test]
    fn test_grouping_json_rejects_unknown_fields() {
        let json = r#"{ "name": "Core", "job": [ { "name": "build" } ] }"#;
        assert!(serde_json::from_str::<Grouping>(json).is_err());

        let nested = r#"{ "name": "All", "views": [ { "name": "Core", "jobs": [], "colour": "red" } ] }"#;
        assert!(serde_json::from_str::<Grouping>(nested).is_err());
    }

    #[test]
    fn test_grouping_json_roundtrip_shape() {
        let view = Grouping::Nested {
            name: "All".to_string(),
            views: vec![make_leaf("Core", &["build"])],
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "All",
                "views": [ { "name": "Core", "jobs": [ { "name": "build", "statuses": [] } ] } ]
            })
        );
        assert_eq!(serde_json::from_value::<Grouping>(value).unwrap(), view);
    }
}
