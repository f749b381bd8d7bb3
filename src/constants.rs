pub mod session {

    /// Three days.
    pub const TTL_SECONDS: u64 = 259_200;

    pub const LOGIN_COOKIE: &str = "loginToken";
}

pub mod password {

    pub const SALT_BYTES: usize = 64;
}
