use crate::model::category::CategoryId;

/// Request to look up one category by its stored id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCategoryById {
    id: CategoryId,
}

impl GetCategoryById {
    pub fn new(id: CategoryId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }
}
