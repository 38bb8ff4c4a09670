pub mod extensions;
pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, ProfilePatch, Role, User, UserSummary};
