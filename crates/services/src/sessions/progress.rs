/// Snapshot of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// Questions closed so far, including the current one once resolved.
    pub resolved: usize,
    pub remaining: usize,
    pub score: u32,
    pub is_complete: bool,
}
