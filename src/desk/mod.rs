//! Per-user coordinators between local state and storage.
//!
//! A desk resolves the signed-in member once, loads that member's state
//! once, and from then on treats its local copy as the truth. Every
//! successful edit is handed to an [`Autosave`](crate::autosave::Autosave)
//! writer; storage failures are reported through [`Health`](crate::autosave::Health)
//! and never block the next edit.
mod game;
mod session;

pub use game::*;
pub use session::*;

use crate::identity::Account;
use crate::identity::Member;

/// Resolve the signed-in member or refuse to open a desk.
async fn signed_in<A>(account: &A) -> anyhow::Result<Member>
where
    A: Account + ?Sized,
{
    account
        .current()
        .await
        .ok_or_else(|| anyhow::anyhow!("no member is signed in"))
}
