use chrono::NaiveDate;

/// Replacement values for a member's editable profile data.
///
/// An empty `profile` clears the handle.
#[derive(Debug, Clone)]
pub struct UpdateMemberInfoDto {
    /// Required; surrounding whitespace is trimmed before it is stored.
    pub nickname: String,
    pub profile: String,
    pub birth_date: Option<NaiveDate>,
}
