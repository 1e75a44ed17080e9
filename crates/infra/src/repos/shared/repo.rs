/// Outcome of a conditional update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateResult {
    /// `false` if the stored row no longer matched the expected version
    pub matched: bool,
}
