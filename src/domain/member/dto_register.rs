/// Registration input as received from a transport adapter.
#[derive(Debug, Clone)]
pub struct RegisterMemberDto {
    pub email: String,
    /// Required; surrounding whitespace is trimmed before it is stored.
    pub nickname: String,
    pub password: String,
}
