/// The account behind a live session, resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    /// Row id of the session the request was authenticated with
    pub session_id: i64,
}
