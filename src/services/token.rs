/// Source of opaque session tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenIssuer;

impl TokenIssuer for UuidTokenIssuer {
    fn issue(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
