pub mod image_mapper;
pub mod password;
pub mod token;
pub mod user_mapper;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod session_service;
pub mod session_service_impl;
pub use session_service::{SessionError, SessionService};
pub use session_service_impl::CacheSessionService;

pub use token::{TokenIssuer, UuidTokenIssuer};
