/// Logical join type of a join condition frame.
///
/// Dialects map these onto their own join tokens; the `outer` flag is
/// carried separately on the condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    Cross,
    Full,
    #[default]
    Inner,
    Left,
    Right,
}
