pub mod migration;
pub mod pre_signup;

pub use migration::MigrationHandler;
pub use pre_signup::PreSignUpHandler;
