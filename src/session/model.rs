use crate::api::UserProfile;

/// The client's belief about the current login state. Snapshots are cheap
/// to clone and safe to hold across state transitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub is_logged_in: bool,
    pub username: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn logged_out() -> Session {
        Session::default()
    }

    pub(crate) fn logged_in(user: UserProfile) -> Session {
        Session {
            is_logged_in: true,
            username: Some(user.username.clone()),
            user: Some(user),
        }
    }

    /// Staff flag for routing decisions; false while logged out.
    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_staff)
    }
}
