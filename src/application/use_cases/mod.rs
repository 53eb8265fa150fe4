//! Use case implementations.

mod login_use_case;
mod logout_use_case;

pub use login_use_case::LoginUseCase;
pub use logout_use_case::LogoutUseCase;
