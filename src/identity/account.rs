use super::*;

/// Answers "who is signed in".
///
/// Injected into the desks instead of being looked up from ambient state,
/// so every desk is tied to exactly one account handle.
#[async_trait::async_trait]
pub trait Account: Send + Sync {
    async fn current(&self) -> Option<Member>;
}

/// A fixed member is always signed in.
#[async_trait::async_trait]
impl Account for Member {
    async fn current(&self) -> Option<Member> {
        Some(self.clone())
    }
}

/// `None` models a signed-out visitor.
#[async_trait::async_trait]
impl Account for Option<Member> {
    async fn current(&self) -> Option<Member> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    #[tokio::test]
    async fn fixed_member_is_current() {
        let member = Member::new(ID::default(), "hero".into(), "hero@home.game".into());
        assert_eq!(member.current().await, Some(member.clone()));
        assert_eq!(Some(member.clone()).current().await, Some(member));
        assert_eq!(None::<Member>.current().await, None);
    }
}
