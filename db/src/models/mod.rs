pub mod course;
pub mod review;
pub mod user;
pub mod user_permission;

pub use course::Entity as Course;
pub use review::Entity as Review;
pub use user::Entity as User;
pub use user_permission::Entity as UserPermission;
