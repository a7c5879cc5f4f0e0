//! Class search and the type-ahead class picker.

use uuid::Uuid;

use super::ViewStatus;
use crate::client::ClassApi;
use crate::data::class::Class;
use crate::util::name_matches;

pub const MAX_SUGGESTIONS: usize = 5;

/// Classes whose name contains `term`, ignoring case. A blank term matches everything.
pub fn filter<'a>(classes: &'a [Class], term: &str) -> Vec<&'a Class> {
    classes
        .iter()
        .filter(|it| name_matches(&it.name, term))
        .collect()
}

/// At most [MAX_SUGGESTIONS] matches for `input`, none while the input is blank.
pub fn suggestions<'a>(classes: &'a [Class], input: &str) -> Vec<&'a Class> {
    if input.trim().is_empty() {
        return vec![];
    }
    filter(classes, input).into_iter().take(MAX_SUGGESTIONS).collect()
}

#[derive(Debug, Default)]
pub struct SearchView {
    classes: Vec<Class>,
    pub term: String,
    pub status: ViewStatus,
}

impl SearchView {
    pub fn new() -> SearchView {
        SearchView::default()
    }

    pub async fn load<A: ClassApi + ?Sized>(&mut self, api: &A) -> bool {
        self.status.start();
        match api.list_classes().await {
            Ok(classes) => {
                self.classes = classes;
                self.status.done();
                true
            }
            Err(e) => {
                self.status.fail("Failed to fetch classes.", e);
                false
            }
        }
    }

    pub fn set_term(&mut self, term: impl ToString) {
        self.term = term.to_string();
    }

    pub fn results(&self) -> Vec<&Class> {
        filter(&self.classes, &self.term)
    }
}

/// Free-text class picker: typing narrows the suggestions, picking one fills the input.
#[derive(Debug, Default)]
pub struct ClassSelector {
    classes: Vec<Class>,
    input: String,
    selected: Option<Uuid>,
    pub status: ViewStatus,
}

impl ClassSelector {
    pub fn new() -> ClassSelector {
        ClassSelector::default()
    }

    pub async fn load<A: ClassApi + ?Sized>(&mut self, api: &A) -> bool {
        match api.list_classes().await {
            Ok(classes) => {
                self.classes = classes;
                true
            }
            Err(e) => {
                self.status.fail("Failed to fetch classes.", e);
                false
            }
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Typing invalidates any previous pick.
    pub fn set_input(&mut self, input: impl ToString) {
        self.input = input.to_string();
        self.selected = None;
    }

    pub fn suggestions(&self) -> Vec<&Class> {
        suggestions(&self.classes, &self.input)
    }

    pub fn select(&mut self, id: Uuid) -> Option<&Class> {
        let class = self.classes.iter().find(|it| it.id == id)?;
        self.input = class.name.clone();
        self.selected = Some(id);
        Some(class)
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }
}
