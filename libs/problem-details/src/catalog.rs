//! Static problem type definitions for use in adapters

use crate::problem::ProblemDetails;

/// Static problem type definition
#[derive(Debug, Clone, Copy)]
pub struct ProblemDef {
    pub status: u16,
    pub title: &'static str,
    pub type_url: &'static str,
}

impl ProblemDef {
    /// Convert this definition into a record for one occurrence
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> ProblemDetails {
        ProblemDetails::new()
            .with_type(self.type_url)
            .with_title(self.title)
            .with_status(self.status)
            .with_detail(detail)
    }
}
