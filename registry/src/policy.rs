/// What [`Registry::register`](crate::Registry::register) does when a
/// different type is registered under a name that is already taken.
///
/// Registering the same type twice is never a collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Fail with [`Error::NameCollision`](crate::error::Error::NameCollision)
    /// and leave the registry unchanged.
    #[default]
    Reject,
    /// The newest registration takes over the name.
    Replace,
}
