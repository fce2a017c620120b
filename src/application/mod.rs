pub mod identity;

pub use identity::UserService;
