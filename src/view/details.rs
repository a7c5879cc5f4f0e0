use uuid::Uuid;

use super::ViewStatus;
use crate::client::ClassApi;
use crate::data::class::{Activity, Class};

/// Activities sharing one part label.
#[derive(Debug, PartialEq, Eq)]
pub struct ActivityGroup<'a> {
    pub part: &'a str,
    pub activities: Vec<&'a Activity>,
}

/// Groups activities by part, keeping the order in which each part first appears.
/// Untagged activities land under [UNCATEGORIZED](crate::data::class::UNCATEGORIZED).
pub fn group_by_part(activities: &[Activity]) -> Vec<ActivityGroup<'_>> {
    let mut groups: Vec<ActivityGroup> = vec![];
    for activity in activities {
        let part = activity.part_label();
        match groups.iter_mut().find(|it| it.part == part) {
            Some(group) => group.activities.push(activity),
            None => groups.push(ActivityGroup {
                part,
                activities: vec![activity],
            }),
        }
    }
    groups
}

/// Read-only class page.
#[derive(Debug, Default)]
pub struct ClassDetailsView {
    class: Option<Class>,
    pub status: ViewStatus,
}

impl ClassDetailsView {
    pub fn new() -> ClassDetailsView {
        ClassDetailsView::default()
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    pub async fn load<A: ClassApi + ?Sized>(&mut self, api: &A, id: Uuid) -> bool {
        self.status.start();
        match api.get_class(id).await {
            Ok(class) => {
                self.class = Some(class);
                self.status.done();
                true
            }
            Err(e) => {
                self.status.fail("Failed to fetch class details.", e);
                false
            }
        }
    }

    pub fn groups(&self) -> Vec<ActivityGroup<'_>> {
        match &self.class {
            Some(class) => group_by_part(&class.activities),
            None => vec![],
        }
    }
}
